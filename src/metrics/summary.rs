//! Cross-sheet overview: one mean value per sheet.

use std::fmt;

use serde::Serialize;

use super::normalize::NormalizedSheet;

/// Mean value of one sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    /// Sheet the mean was computed over.
    pub sheet_name: String,
    /// `None` when the sheet has no usable values.
    pub average_value: Option<f64>,
}

impl fmt::Display for SummaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.average_value {
            Some(avg) => write!(f, "Average Value: {avg:.2}"),
            None => f.write_str("Average Value: n/a"),
        }
    }
}

/// Arithmetic mean, ignoring non-finite values. `None` if nothing remains.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, n) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0_usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// One [`SummaryEntry`] per sheet, in sheet order.
pub fn summarize(sheets: &[NormalizedSheet]) -> Vec<SummaryEntry> {
    sheets
        .iter()
        .map(|sheet| SummaryEntry {
            sheet_name: sheet.sheet_name.clone(),
            average_value: mean(sheet.values()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{mean, summarize, SummaryEntry};
    use crate::metrics::normalize::normalize;
    use crate::types::{RecordTable, Value};

    fn value_table(values: &[Value]) -> RecordTable {
        RecordTable::new(
            vec!["Value".to_string()],
            values.iter().map(|v| vec![v.clone()]).collect(),
        )
    }

    #[test]
    fn mean_skips_nan_and_handles_empty() {
        assert_eq!(mean([5.0, 6.0, f64::NAN, 7.0]), Some(6.0));
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([f64::NAN]), None);
    }

    #[test]
    fn summarize_keeps_sheet_order_and_empty_sheets() {
        let a = normalize("Clinic A", &value_table(&[Value::Float64(5.0), Value::Float64(6.0)]));
        let b = normalize("Clinic B", &value_table(&[Value::Utf8("pending".to_string())]));
        let c = normalize("Clinic C", &value_table(&[Value::Int64(7)]));

        let entries = summarize(&[a, b, c]);
        assert_eq!(
            entries,
            vec![
                SummaryEntry {
                    sheet_name: "Clinic A".to_string(),
                    average_value: Some(5.5)
                },
                SummaryEntry {
                    sheet_name: "Clinic B".to_string(),
                    average_value: None
                },
                SummaryEntry {
                    sheet_name: "Clinic C".to_string(),
                    average_value: Some(7.0)
                },
            ]
        );
    }

    #[test]
    fn display_matches_overview_metric() {
        let entry = SummaryEntry {
            sheet_name: "HbA1c".to_string(),
            average_value: Some(5.5478),
        };
        assert_eq!(entry.to_string(), "Average Value: 5.55");
    }
}
