#![cfg(feature = "excel")]

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{IngestionError, IngestionResult};
use crate::types::{RecordTable, Sheet, Value, Workbook};

/// Ingest a single worksheet (`.xlsx`, `.xls`, `.ods`, etc.) into a one-sheet [`Workbook`].
///
/// Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook.
pub fn ingest_excel_from_path(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
) -> IngestionResult<Workbook> {
    let mut workbook = open_workbook_auto(path)?;
    let name = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| IngestionError::SchemaMismatch {
                message: "workbook has no sheets".to_string(),
            })?,
    };
    let range = workbook.worksheet_range(&name)?;
    let table = sheet_range_to_table(&range);
    Ok(Workbook::single(name, table))
}

/// Ingest multiple sheets from an Excel workbook, one [`Sheet`] per worksheet.
///
/// - If `sheet_names` is `None`, ingests **all sheets** in workbook order.
/// - If `sheet_names` is `Some(&[...])`, ingests only those sheets (in the provided order).
///
/// Sheets may carry different columns; each is analyzed on its own.
pub fn ingest_excel_workbook_from_path(
    path: impl AsRef<Path>,
    sheet_names: Option<&[&str]>,
) -> IngestionResult<Workbook> {
    let mut workbook = open_workbook_auto(path)?;

    let names: Vec<String> = match sheet_names {
        Some(names) => names.iter().map(|s| s.to_string()).collect(),
        None => workbook.sheet_names().to_vec(),
    };
    if names.is_empty() {
        return Err(IngestionError::SchemaMismatch {
            message: "workbook has no sheets".to_string(),
        });
    }

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook.worksheet_range(&name)?;
        let table = sheet_range_to_table(&range);
        sheets.push(Sheet::new(name, table));
    }

    Ok(Workbook::new(sheets))
}

/// Convert a worksheet range: the first non-empty row is the header, later rows are records.
///
/// A blank worksheet becomes an empty table.
fn sheet_range_to_table(range: &calamine::Range<Data>) -> RecordTable {
    let mut rows = range.rows();

    let Some(header) = rows
        .by_ref()
        .find(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
    else {
        return RecordTable::default();
    };
    let columns: Vec<String> = header.iter().map(cell_to_header_string).collect();

    let records: Vec<Vec<Value>> = rows
        .map(|row| row.iter().map(convert_cell).collect::<Vec<_>>())
        .collect();

    RecordTable::new(columns, records)
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn convert_cell(c: &Data) -> Value {
    match c {
        Data::Empty => Value::Null,
        Data::Int(i) => Value::Int64(*i),
        Data::Float(f) => Value::Float64(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) => Value::infer(s),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Utf8(s.clone()),
        // Error cells (#N/A, #DIV/0!) carry no usable value.
        Data::Error(_) => Value::Null,
        other => Value::Utf8(other.to_string()),
    }
}
