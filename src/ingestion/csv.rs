//! CSV ingestion implementation.

use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{RecordTable, Value};

/// Sheet name given to a CSV file, which only ever holds one table.
pub const CSV_SHEET_NAME: &str = "Sheet1";

/// Ingest a CSV file into an in-memory [`RecordTable`].
///
/// Rules:
///
/// - CSV must have a header row; header names are trimmed.
/// - Cells are typed by inference ([`Value::infer`]): empty → null, then integer, float, text.
/// - Ragged rows are allowed; missing trailing cells read as null.
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> IngestionResult<RecordTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV data from an in-memory string.
pub fn ingest_csv_from_str(input: &str) -> IngestionResult<RecordTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input.as_bytes());
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> IngestionResult<RecordTable> {
    let headers = rdr.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestionError::SchemaMismatch {
            message: "csv has no header row".to_string(),
        });
    }
    let columns: Vec<String> = headers.iter().map(|h| h.trim().to_owned()).collect();

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(Value::infer).collect());
    }

    Ok(RecordTable::new(columns, rows))
}
