//! `health-metrics` turns tabular lab-test records (HbA1c and similar) into per-sheet health
//! summaries: risk-tier counts, a letter grade, sex and age breakdowns, and a cross-sheet overview.
//!
//! The crate has two halves:
//!
//! - [`metrics`]: the aggregation engine. Pure functions over borrowed [`types::RecordTable`]s that
//!   never fail and never perform I/O.
//! - [`ingestion`]: reads CSV (and, with the `excel` feature, workbook) files into a
//!   [`types::Workbook`] for the engine.
//!
//! ## Risk tiers and grades
//!
//! | value          | tier                |
//! |----------------|---------------------|
//! | `< 5.7`        | Normal              |
//! | `5.7 ..< 6.5`  | Pre-Diabetes        |
//! | `>= 6.5`       | Diabetes            |
//!
//! The sheet grade depends on the diabetic share: `< 10%` A, `< 20%` B, `< 30%` C, otherwise D.
//!
//! ## Quick example: analyze in-memory records
//!
//! ```rust
//! use health_metrics::metrics::{analyze_workbook, Grade};
//! use health_metrics::types::{RecordTable, Sheet, Value, Workbook};
//!
//! let columns = vec!["Value".to_string(), "Sex".to_string()];
//! let clinic_a = RecordTable::new(
//!     columns.clone(),
//!     vec![
//!         vec![Value::Float64(5.2), Value::Utf8("Male".to_string())],
//!         vec![Value::Float64(5.9), Value::Utf8("Female".to_string())],
//!     ],
//! );
//! let clinic_b = RecordTable::new(
//!     columns,
//!     vec![vec![Value::Float64(7.1), Value::Null]],
//! );
//!
//! let report = analyze_workbook(&Workbook::new(vec![
//!     Sheet::new("Clinic A", clinic_a),
//!     Sheet::new("Clinic B", clinic_b),
//! ]));
//!
//! assert_eq!(report.sheets[0].grade, Grade::A);
//! assert_eq!(report.sheets[1].grade, Grade::D);
//! assert_eq!(report.summary.as_ref().map(Vec::len), Some(2));
//! ```
//!
//! ## Quick example: analyze a file
//!
//! ```no_run
//! use health_metrics::ingestion::IngestionOptions;
//! use health_metrics::metrics::AnalysisOptions;
//!
//! # fn main() -> Result<(), health_metrics::IngestionError> {
//! let report = health_metrics::analyze_path(
//!     "a1c_results.csv",
//!     &IngestionOptions::default(),
//!     &AnalysisOptions::default(),
//! )?;
//! for sheet in &report.sheets {
//!     println!("{}: grade {} over {} tests", sheet.test_label, sheet.grade, sheet.total);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`metrics`]: normalization, classification, grading, demographics, summaries, reports
//! - [`ingestion`]: unified ingestion entrypoints and format-specific implementations
//! - [`types`]: raw record table, sheet and workbook types
//! - [`error`]: error types used across ingestion

use std::path::Path;

pub mod error;
pub mod ingestion;
pub mod metrics;
pub mod types;

pub use error::{IngestionError, IngestionResult};

use ingestion::IngestionOptions;
use metrics::{AnalysisOptions, WorkbookReport};

/// Ingest `path` and analyze every sheet it contains.
///
/// Only ingestion can fail; once the workbook is read, analysis always produces a report.
pub fn analyze_path(
    path: impl AsRef<Path>,
    ingestion: &IngestionOptions,
    analysis: &AnalysisOptions,
) -> IngestionResult<WorkbookReport> {
    let workbook = ingestion::ingest_from_path(path, ingestion)?;
    Ok(metrics::analyze_workbook_with(&workbook, analysis))
}
