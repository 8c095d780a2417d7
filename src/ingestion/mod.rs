//! Ingestion entrypoints and implementations.
//!
//! Ingestion plays the collaborator role for the metrics engine: it turns files into a
//! [`crate::types::Workbook`] and nothing more. Most callers should use [`ingest_from_path`]
//! (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`IngestionOptions`])
//! - reads a CSV as one sheet, or an Excel workbook as one sheet per worksheet
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod observability;
pub mod unified;

pub use observability::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, StdErrObserver,
    TracingObserver,
};
pub use unified::{ingest_from_path, ExcelSheetSelection, IngestionFormat, IngestionOptions};
