//! Report assembly: the engine's output contract.
//!
//! [`analyze_workbook`] turns every sheet of a [`Workbook`] into a [`SheetReport`] and, when more
//! than one sheet is present, adds the cross-sheet [`SummaryEntry`] list.

use rayon::prelude::*;
use serde::Serialize;

use crate::types::{RecordTable, Workbook};

use super::demographics::{AgeBucketHistogram, SexSplit};
use super::grade::Grade;
use super::normalize::{normalize_with, ColumnAliases, NormalizedSheet};
use super::risk::{RiskCounts, RiskPercentages, RiskTier};
use super::summary::{mean, summarize, SummaryEntry};

/// Options controlling analysis.
///
/// Use [`Default`] for common cases.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    /// Legacy column names to resolve before classification.
    pub aliases: ColumnAliases,
    /// Analyze sheets concurrently on the rayon global pool.
    ///
    /// Output order always follows the input sheet order.
    pub parallel: bool,
}

/// Whether a sheet had any usable rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportStatus {
    /// At least one row survived normalization.
    Ok,
    /// Zero usable rows; every metric is zero and demographic sections are absent.
    NoUsableData,
}

/// Per-sheet health summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetReport {
    /// Name of the analyzed sheet.
    pub sheet_name: String,
    /// `Parameter Name` of the sheet, or the sheet name.
    pub test_label: String,
    /// Whether any row survived normalization.
    pub status: ReportStatus,
    /// Letter grade from the unrounded diabetic share.
    pub grade: Grade,
    /// Mean test value; `0.0` when there is no usable data.
    pub average_value: f64,
    /// Usable rows.
    pub total: usize,
    /// Rows per risk tier.
    pub counts: RiskCounts,
    /// Tier shares rounded to two decimals.
    pub percentages: RiskPercentages,
    /// Present when the sheet has a sex column and usable rows.
    pub sex_split: Option<SexSplit>,
    /// Present when the sheet has an age column and usable rows.
    pub age_histogram: Option<AgeBucketHistogram>,
    /// Rows dropped during normalization.
    pub dropped_rows: usize,
}

impl SheetReport {
    /// Build a report from an already normalized sheet.
    pub fn from_normalized(sheet: &NormalizedSheet) -> Self {
        let counts = RiskCounts::from_values(sheet.values());
        let has_data = counts.total > 0;

        let report = Self {
            sheet_name: sheet.sheet_name.clone(),
            test_label: sheet.label.clone(),
            status: if has_data {
                ReportStatus::Ok
            } else {
                ReportStatus::NoUsableData
            },
            grade: Grade::from_diabetic_percent(counts.share(RiskTier::Diabetic)),
            average_value: mean(sheet.values()).unwrap_or(0.0),
            total: counts.total,
            counts,
            percentages: counts.percentages(),
            sex_split: (has_data && sheet.has_sex).then(|| SexSplit::from_records(&sheet.records)),
            age_histogram: (has_data && sheet.has_age)
                .then(|| AgeBucketHistogram::from_records(&sheet.records)),
            dropped_rows: sheet.dropped,
        };

        tracing::trace!(
            sheet = %report.sheet_name,
            total = report.total,
            grade = %report.grade,
            "sheet report assembled"
        );
        report
    }

    /// `true` when no row survived normalization.
    pub fn is_empty(&self) -> bool {
        self.status == ReportStatus::NoUsableData
    }
}

/// Reports for every sheet plus the optional cross-sheet overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkbookReport {
    /// One report per sheet, in input order.
    pub sheets: Vec<SheetReport>,
    /// Mean per sheet; only present when the workbook has more than one sheet.
    pub summary: Option<Vec<SummaryEntry>>,
}

impl WorkbookReport {
    /// Report for the named sheet.
    pub fn sheet(&self, name: &str) -> Option<&SheetReport> {
        self.sheets.iter().find(|r| r.sheet_name == name)
    }

    /// Render as pretty-printed JSON for a presentation layer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Analyze a single table with default options.
pub fn analyze_sheet(sheet_name: &str, table: &RecordTable) -> SheetReport {
    analyze_sheet_with(sheet_name, table, &AnalysisOptions::default())
}

/// Analyze a single table.
pub fn analyze_sheet_with(
    sheet_name: &str,
    table: &RecordTable,
    options: &AnalysisOptions,
) -> SheetReport {
    SheetReport::from_normalized(&normalize_with(sheet_name, table, &options.aliases))
}

/// Analyze every sheet of `workbook` with default options.
pub fn analyze_workbook(workbook: &Workbook) -> WorkbookReport {
    analyze_workbook_with(workbook, &AnalysisOptions::default())
}

/// Analyze every sheet of `workbook`.
///
/// The summary list is only produced when there is more than one sheet.
pub fn analyze_workbook_with(workbook: &Workbook, options: &AnalysisOptions) -> WorkbookReport {
    let normalized: Vec<NormalizedSheet> = if options.parallel {
        workbook
            .sheets
            .par_iter()
            .map(|s| normalize_with(&s.name, &s.table, &options.aliases))
            .collect()
    } else {
        workbook
            .sheets
            .iter()
            .map(|s| normalize_with(&s.name, &s.table, &options.aliases))
            .collect()
    };

    let sheets: Vec<SheetReport> = if options.parallel {
        normalized.par_iter().map(SheetReport::from_normalized).collect()
    } else {
        normalized.iter().map(SheetReport::from_normalized).collect()
    };

    let summary = (normalized.len() > 1).then(|| summarize(&normalized));

    WorkbookReport { sheets, summary }
}

#[cfg(test)]
mod tests {
    use super::{
        analyze_sheet, analyze_workbook, analyze_workbook_with, AnalysisOptions, ReportStatus,
    };
    use crate::metrics::grade::Grade;
    use crate::metrics::risk::{RiskCounts, RiskPercentages};
    use crate::types::{RecordTable, Sheet, Value, Workbook};

    fn table(columns: &[&str], rows: Vec<Vec<Value>>) -> RecordTable {
        RecordTable::new(columns.iter().map(|s| s.to_string()).collect(), rows)
    }

    fn values_table(values: &[f64]) -> RecordTable {
        table(
            &["Value"],
            values.iter().map(|v| vec![Value::Float64(*v)]).collect(),
        )
    }

    fn text(s: &str) -> Value {
        Value::Utf8(s.to_string())
    }

    #[test]
    fn example_values_grade_d() {
        let report = analyze_sheet("Sheet1", &values_table(&[5.0, 5.7, 6.5, 7.0]));
        assert_eq!(report.status, ReportStatus::Ok);
        assert_eq!(
            report.counts,
            RiskCounts {
                normal: 1,
                pre_risk: 1,
                diabetic: 2,
                total: 4
            }
        );
        assert_eq!(report.percentages.diabetic, 50.0);
        assert_eq!(report.grade, Grade::D);
        assert!((report.average_value - 6.05).abs() < 1e-9);
        assert_eq!(report.test_label, "Sheet1");
        assert!(report.sex_split.is_none());
        assert!(report.age_histogram.is_none());
    }

    #[test]
    fn empty_table_is_degenerate_report() {
        let report = analyze_sheet("Empty", &RecordTable::default());
        assert!(report.is_empty());
        assert_eq!(report.total, 0);
        assert_eq!(report.percentages, RiskPercentages::default());
        assert_eq!(report.grade, Grade::A);
        assert_eq!(report.average_value, 0.0);
        assert!(report.sex_split.is_none());
        assert!(report.age_histogram.is_none());
    }

    #[test]
    fn all_rows_dropped_omits_demographics() {
        let t = table(
            &["Value", "Age", "Sex"],
            vec![vec![text("n/a"), Value::Int64(40), text("Male")]],
        );
        let report = analyze_sheet("Sheet1", &t);
        assert_eq!(report.status, ReportStatus::NoUsableData);
        assert_eq!(report.dropped_rows, 1);
        assert!(report.sex_split.is_none());
        assert!(report.age_histogram.is_none());
    }

    #[test]
    fn demographic_sections_follow_columns() {
        let t = table(
            &["Age", "Sex", "Parameter Name", "df_a1c"],
            vec![
                vec![text("34 years"), text("Male"), text("HbA1c"), Value::Float64(5.4)],
                vec![Value::Int64(67), text("Female"), Value::Null, Value::Float64(6.1)],
                vec![Value::Null, Value::Null, Value::Null, Value::Float64(6.9)],
            ],
        );
        let report = analyze_sheet("Sheet1", &t);
        assert_eq!(report.test_label, "HbA1c");
        let split = report.sex_split.expect("sex split");
        assert_eq!(split.male_percent, 50.0);
        assert_eq!(split.female_percent, 50.0);
        let hist = report.age_histogram.expect("age histogram");
        assert_eq!(hist.count("26-35"), Some(1));
        assert_eq!(hist.count("66-75"), Some(1));
        assert_eq!(hist.total(), 2);
        assert_eq!(report.grade, Grade::D);
    }

    #[test]
    fn single_sheet_has_no_summary() {
        let wb = Workbook::single("Sheet1", values_table(&[5.0]));
        let out = analyze_workbook(&wb);
        assert_eq!(out.sheets.len(), 1);
        assert!(out.summary.is_none());
    }

    #[test]
    fn multi_sheet_summary_follows_input_order() {
        let wb = Workbook::new(vec![
            Sheet::new("Zeta", values_table(&[5.0, 7.0])),
            Sheet::new("Alpha", RecordTable::default()),
            Sheet::new("Mid", values_table(&[6.0])),
        ]);
        let out = analyze_workbook(&wb);
        let names: Vec<_> = out.sheets.iter().map(|r| r.sheet_name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);

        let summary = out.summary.expect("summary for multiple sheets");
        let averages: Vec<_> = summary.iter().map(|e| e.average_value).collect();
        assert_eq!(averages, vec![Some(6.0), None, Some(6.0)]);
    }

    #[test]
    fn parallel_matches_sequential() {
        let wb = Workbook::new(
            (0..16)
                .map(|i| {
                    let values: Vec<f64> = (0..50).map(|j| 4.5 + f64::from((i * j) % 40) * 0.1).collect();
                    Sheet::new(format!("Sheet{i}"), values_table(&values))
                })
                .collect(),
        );
        let sequential = analyze_workbook(&wb);
        let parallel = analyze_workbook_with(
            &wb,
            &AnalysisOptions {
                parallel: true,
                ..Default::default()
            },
        );
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn rerunning_is_bit_identical() {
        let t = table(
            &["Value", "Age", "Sex"],
            vec![
                vec![Value::Float64(5.9), text("45"), text("Female")],
                vec![Value::Float64(6.7), text("71"), text("Male")],
            ],
        );
        let first = analyze_sheet("Sheet1", &t);
        let second = analyze_sheet("Sheet1", &t);
        assert_eq!(first, second);
        assert_eq!(first.average_value.to_bits(), second.average_value.to_bits());
    }

    #[test]
    fn json_output_contains_grade_and_counts() {
        let wb = Workbook::single("Sheet1", values_table(&[6.6]));
        let json = analyze_workbook(&wb).to_json().unwrap();
        assert!(json.contains("\"grade\": \"D\""));
        assert!(json.contains("\"diabetic\": 1"));
        assert!(json.contains("\"summary\": null"));
    }
}
