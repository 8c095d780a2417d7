//! Risk-tier classification over normalized values.

use std::fmt;

use serde::Serialize;

use super::{percent, round2};

/// Ordered risk tiers, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskTier {
    /// value < 5.7
    Normal,
    /// 5.7 <= value < 6.5
    PreRisk,
    /// value >= 6.5
    Diabetic,
}

/// Exclusive upper bound of each tier below [`RiskTier::Diabetic`], in ascending order.
///
/// A value equal to a bound belongs to the next tier up.
pub const RISK_BREAKPOINTS: [(f64, RiskTier); 2] =
    [(5.7, RiskTier::Normal), (6.5, RiskTier::PreRisk)];

impl RiskTier {
    /// All tiers in severity order.
    pub const ALL: [RiskTier; 3] = [Self::Normal, Self::PreRisk, Self::Diabetic];

    /// Classify a single value.
    pub fn classify(value: f64) -> Self {
        RISK_BREAKPOINTS
            .iter()
            .find(|(upper, _)| value < *upper)
            .map(|(_, tier)| *tier)
            .unwrap_or(Self::Diabetic)
    }

    /// Human-readable label including the tier's range.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal (<5.7)",
            Self::PreRisk => "Pre-Diabetes (5.7-6.4)",
            Self::Diabetic => "Diabetes (>=6.5)",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-tier counts. `normal + pre_risk + diabetic == total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RiskCounts {
    /// Values below 5.7.
    pub normal: usize,
    /// Values in `[5.7, 6.5)`.
    pub pre_risk: usize,
    /// Values at or above 6.5.
    pub diabetic: usize,
    /// Every classified value.
    pub total: usize,
}

impl RiskCounts {
    /// Classify and count every value.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        values
            .into_iter()
            .fold(Self::default(), |mut acc, v| {
                match RiskTier::classify(v) {
                    RiskTier::Normal => acc.normal += 1,
                    RiskTier::PreRisk => acc.pre_risk += 1,
                    RiskTier::Diabetic => acc.diabetic += 1,
                }
                acc.total += 1;
                acc
            })
    }

    /// Count for a single tier.
    pub const fn count(&self, tier: RiskTier) -> usize {
        match tier {
            RiskTier::Normal => self.normal,
            RiskTier::PreRisk => self.pre_risk,
            RiskTier::Diabetic => self.diabetic,
        }
    }

    /// Unrounded share of `tier` in percent; `0.0` when there are no values.
    pub fn share(&self, tier: RiskTier) -> f64 {
        percent(self.count(tier), self.total)
    }

    /// Tier percentages rounded to two decimals.
    pub fn percentages(&self) -> RiskPercentages {
        RiskPercentages {
            normal: round2(self.share(RiskTier::Normal)),
            pre_risk: round2(self.share(RiskTier::PreRisk)),
            diabetic: round2(self.share(RiskTier::Diabetic)),
        }
    }

    /// Display form used by dashboards, e.g. `"2 (50.00%)"`.
    pub fn describe(&self, tier: RiskTier) -> String {
        format!("{} ({:.2}%)", self.count(tier), self.share(tier))
    }
}

/// Tier percentages, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RiskPercentages {
    /// Share of [`RiskTier::Normal`] values.
    pub normal: f64,
    /// Share of [`RiskTier::PreRisk`] values.
    pub pre_risk: f64,
    /// Share of [`RiskTier::Diabetic`] values.
    pub diabetic: f64,
}

impl RiskPercentages {
    /// Percentage for a single tier.
    pub const fn get(&self, tier: RiskTier) -> f64 {
        match tier {
            RiskTier::Normal => self.normal,
            RiskTier::PreRisk => self.pre_risk,
            RiskTier::Diabetic => self.diabetic,
        }
    }
}
