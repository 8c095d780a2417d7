//! Letter grade from the diabetic share of a sheet.

use std::fmt;

use serde::Serialize;

/// Overall diabetic-risk severity, `A` best to `D` worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    /// Diabetic share below 10%.
    A,
    /// Below 20%.
    B,
    /// Below 30%.
    C,
    /// 30% or more.
    D,
}

/// Exclusive upper bound on the diabetic percentage for each grade better than `D`.
pub const GRADE_BREAKPOINTS: [(f64, Grade); 3] =
    [(10.0, Grade::A), (20.0, Grade::B), (30.0, Grade::C)];

impl Grade {
    /// Grade for a diabetic percentage (0–100). Anything at or above 30, or NaN, is `D`.
    pub fn from_diabetic_percent(percent: f64) -> Self {
        GRADE_BREAKPOINTS
            .iter()
            .find(|(upper, _)| percent < *upper)
            .map(|(_, grade)| *grade)
            .unwrap_or(Self::D)
    }

    /// The grade letter.
    pub const fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
