//! Health-metrics aggregation engine.
//!
//! The engine is a set of pure functions over borrowed [`crate::types::RecordTable`]s:
//!
//! - [`normalize`]: clean a raw table into [`NormalizedRecord`]s
//! - [`risk`]: bucket values into [`RiskTier`]s and count them
//! - [`grade`]: map the diabetic share to a letter [`Grade`]
//! - [`demographics`]: sex split and age-range histogram
//! - [`summary`]: one mean per sheet for multi-sheet overviews
//! - [`report`]: compose everything into [`SheetReport`] / [`WorkbookReport`]
//!
//! Nothing here performs I/O or keeps state between calls. Malformed values are dropped, empty
//! sheets produce a [`ReportStatus::NoUsableData`] report, and missing optional columns simply
//! leave the matching report section empty.
//!
//! ## Example
//!
//! ```rust
//! use health_metrics::metrics::{analyze_sheet, Grade};
//! use health_metrics::types::{RecordTable, Value};
//!
//! let table = RecordTable::new(
//!     vec!["df_a1c".to_string()],
//!     vec![
//!         vec![Value::Float64(5.0)],
//!         vec![Value::Float64(5.7)],
//!         vec![Value::Float64(6.5)],
//!         vec![Value::Float64(7.0)],
//!     ],
//! );
//!
//! let report = analyze_sheet("Sheet1", &table);
//! assert_eq!(report.counts.diabetic, 2);
//! assert_eq!(report.percentages.diabetic, 50.0);
//! assert_eq!(report.grade, Grade::D);
//! ```

pub mod demographics;
pub mod grade;
pub mod normalize;
pub mod report;
pub mod risk;
pub mod summary;

pub use demographics::{AgeBucket, AgeBucketHistogram, SexSplit, AGE_BUCKETS};
pub use grade::Grade;
pub use normalize::{normalize, normalize_with, ColumnAliases, NormalizedRecord, NormalizedSheet, Sex};
pub use report::{
    analyze_sheet, analyze_sheet_with, analyze_workbook, analyze_workbook_with, AnalysisOptions,
    ReportStatus, SheetReport, WorkbookReport,
};
pub use risk::{RiskCounts, RiskPercentages, RiskTier};
pub use summary::{summarize, SummaryEntry};

/// `count / total * 100`, or `0.0` when `total == 0`.
pub(crate) fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Round to two decimal places for display.
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
