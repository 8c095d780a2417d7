//! Record normalization: raw [`RecordTable`] → canonical [`NormalizedRecord`]s.
//!
//! Rules:
//!
//! - Legacy column names are resolved through a declared [`ColumnAliases`] table
//!   (by default `df_a1c` → `Value`).
//! - The value column is coerced to numeric. Rows whose value is missing or cannot be parsed are
//!   dropped; they are neither kept with a sentinel nor reported as errors.
//! - `Age` cells keep only the first contiguous run of digits (`"45 yrs"` → `45`). A cell without
//!   digits yields an absent age but does not drop the row.
//! - The test label is the first non-empty `Parameter Name` among retained rows, else the sheet
//!   name.

use serde::Serialize;

use crate::types::{RecordTable, Value};

/// Canonical name of the numeric value column.
pub const VALUE_COLUMN: &str = "Value";
/// Canonical name of the age column.
pub const AGE_COLUMN: &str = "Age";
/// Canonical name of the sex column.
pub const SEX_COLUMN: &str = "Sex";
/// Canonical name of the test/parameter label column.
pub const PARAMETER_COLUMN: &str = "Parameter Name";

/// Declared mapping from legacy column names to canonical ones.
///
/// An alias column takes precedence over a canonical column of the same target, matching
/// rename semantics: the alias *becomes* the canonical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAliases {
    entries: Vec<(String, String)>,
}

impl ColumnAliases {
    /// An alias table with no entries.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register `alias` as another name for `canonical`.
    pub fn with_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.entries.push((alias.into(), canonical.into()));
        self
    }

    /// Iterate `(alias, canonical)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    /// Resolve the column index for `canonical` in `table`.
    ///
    /// Declared aliases are tried first (in order), then the canonical name itself.
    pub fn resolve(&self, table: &RecordTable, canonical: &str) -> Option<usize> {
        self.iter()
            .filter(|(_, target)| *target == canonical)
            .find_map(|(alias, _)| table.index_of(alias))
            .or_else(|| table.index_of(canonical))
    }
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self::empty().with_alias("df_a1c", VALUE_COLUMN)
    }
}

/// Recorded sex of a tested person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Sex {
    /// Exactly `Male`.
    Male,
    /// Exactly `Female`.
    Female,
    /// Any other non-empty label. Counted in the sex-split denominator only.
    Other(String),
}

impl Sex {
    /// Parse a cell; blank and null cells give `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let text = value.as_text()?;
        Some(match text.as_str() {
            "Male" => Self::Male,
            "Female" => Self::Female,
            _ => Self::Other(text),
        })
    }
}

/// One cleaned row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    /// Finite test value.
    pub value: f64,
    /// Age from the first digit run of the `Age` cell.
    pub age: Option<f64>,
    /// Parsed `Sex` cell.
    pub sex: Option<Sex>,
    /// Non-empty `Parameter Name` of the row.
    pub parameter_label: Option<String>,
}

/// Result of normalizing one sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSheet {
    /// Sheet the records came from.
    pub sheet_name: String,
    /// Test label (first `Parameter Name` or the sheet name).
    pub label: String,
    /// Retained records, in input order.
    pub records: Vec<NormalizedRecord>,
    /// Whether the table carried an age column.
    pub has_age: bool,
    /// Whether the table carried a sex column.
    pub has_sex: bool,
    /// Rows dropped because their value could not be parsed, or every row when there is no value
    /// column.
    pub dropped: usize,
}

impl NormalizedSheet {
    /// Iterate retained values.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.value)
    }
}

/// Normalize `table` using the default [`ColumnAliases`].
pub fn normalize(sheet_name: &str, table: &RecordTable) -> NormalizedSheet {
    normalize_with(sheet_name, table, &ColumnAliases::default())
}

/// Normalize `table`, resolving column names through `aliases`.
pub fn normalize_with(
    sheet_name: &str,
    table: &RecordTable,
    aliases: &ColumnAliases,
) -> NormalizedSheet {
    let value_idx = aliases.resolve(table, VALUE_COLUMN);
    let age_idx = aliases.resolve(table, AGE_COLUMN);
    let sex_idx = aliases.resolve(table, SEX_COLUMN);
    let param_idx = aliases.resolve(table, PARAMETER_COLUMN);

    let mut records = Vec::with_capacity(table.row_count());
    let mut dropped = 0;

    match value_idx {
        Some(value_idx) => {
            for row in 0..table.row_count() {
                let Some(value) = table.cell(row, value_idx).to_f64() else {
                    dropped += 1;
                    continue;
                };
                records.push(NormalizedRecord {
                    value,
                    age: age_idx.and_then(|i| extract_age(table.cell(row, i))),
                    sex: sex_idx.and_then(|i| Sex::from_value(table.cell(row, i))),
                    parameter_label: param_idx.and_then(|i| table.cell(row, i).as_text()),
                });
            }
            if dropped > 0 {
                tracing::debug!(
                    sheet = sheet_name,
                    dropped,
                    retained = records.len(),
                    "dropped rows with unparseable values"
                );
            }
        }
        None => {
            dropped = table.row_count();
            tracing::debug!(
                sheet = sheet_name,
                dropped,
                "no value column; sheet has no usable rows"
            );
        }
    }

    let label = records
        .iter()
        .find_map(|r| r.parameter_label.clone())
        .unwrap_or_else(|| sheet_name.to_owned());

    NormalizedSheet {
        sheet_name: sheet_name.to_owned(),
        label,
        records,
        has_age: age_idx.is_some(),
        has_sex: sex_idx.is_some(),
        dropped,
    }
}

/// First contiguous run of ASCII digits in the cell's text form, as a number.
pub fn extract_age(value: &Value) -> Option<f64> {
    let text = value.as_text()?;
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits = &text[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<f64>().ok()
}
