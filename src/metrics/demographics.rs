//! Sex split and age-range histogram.

use serde::Serialize;

use super::normalize::{NormalizedRecord, Sex};
use super::{percent, round2};

/// Share of male and female records among records with a recorded sex.
///
/// Records without a sex are left out of the denominator; `Other` labels stay in it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SexSplit {
    /// Percent of counted records that are `Male`, two decimals.
    pub male_percent: f64,
    /// Percent of counted records that are `Female`, two decimals.
    pub female_percent: f64,
    /// Records with a recorded sex (the denominator).
    pub counted: usize,
}

impl SexSplit {
    /// Split over every record with a recorded sex.
    pub fn from_records(records: &[NormalizedRecord]) -> Self {
        let (mut male, mut female, mut counted) = (0, 0, 0);
        for sex in records.iter().filter_map(|r| r.sex.as_ref()) {
            counted += 1;
            match sex {
                Sex::Male => male += 1,
                Sex::Female => female += 1,
                Sex::Other(_) => {}
            }
        }
        Self {
            male_percent: round2(percent(male, counted)),
            female_percent: round2(percent(female, counted)),
            counted,
        }
    }
}

/// Fixed age ranges as `(label, inclusive upper bound)`; the last range is unbounded.
///
/// Ranges are right-closed and contiguous: `[0,18], (18,25], ... (75,inf)`.
pub const AGE_BUCKETS: [(&str, f64); 7] = [
    ("<18", 18.0),
    ("18-25", 25.0),
    ("26-35", 35.0),
    ("36-50", 50.0),
    ("51-65", 65.0),
    ("66-75", 75.0),
    ("75+", f64::INFINITY),
];

/// Index into [`AGE_BUCKETS`] for `age`; `None` for negative or NaN ages.
pub fn age_bucket_index(age: f64) -> Option<usize> {
    if age.is_nan() || age < 0.0 {
        return None;
    }
    AGE_BUCKETS.iter().position(|(_, upper)| age <= *upper)
}

/// One histogram bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeBucket {
    /// Range label from [`AGE_BUCKETS`].
    pub label: &'static str,
    /// Records whose age falls in the range.
    pub count: usize,
}

/// Counts per fixed age range, always in [`AGE_BUCKETS`] order with empty ranges included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeBucketHistogram {
    buckets: Vec<AgeBucket>,
}

impl AgeBucketHistogram {
    /// Histogram with every bucket at zero.
    pub fn empty() -> Self {
        Self {
            buckets: AGE_BUCKETS
                .iter()
                .map(|(label, _)| AgeBucket {
                    label: *label,
                    count: 0,
                })
                .collect(),
        }
    }

    /// Bucket every record with a usable age.
    pub fn from_records(records: &[NormalizedRecord]) -> Self {
        let mut hist = Self::empty();
        for idx in records
            .iter()
            .filter_map(|r| r.age)
            .filter_map(age_bucket_index)
        {
            hist.buckets[idx].count += 1;
        }
        hist
    }

    /// Buckets in fixed order.
    pub fn buckets(&self) -> &[AgeBucket] {
        &self.buckets
    }

    /// Count for `label`, `None` if the label is not one of [`AGE_BUCKETS`].
    pub fn count(&self, label: &str) -> Option<usize> {
        self.buckets
            .iter()
            .find(|b| b.label == label)
            .map(|b| b.count)
    }

    /// Sum over all buckets.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }
}
