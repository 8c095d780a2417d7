//! Core data model types for raw record tables.
//!
//! Ingestion produces a [`Workbook`]: an ordered list of named [`Sheet`]s, each holding a
//! schema-less [`RecordTable`]. The metrics engine borrows these tables and never mutates them.

use std::fmt;

/// A single raw cell value in a [`RecordTable`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Infer a typed value from raw text.
    ///
    /// Empty (after trimming) becomes [`Value::Null`], integers become [`Value::Int64`], other
    /// numbers become [`Value::Float64`] and everything else stays text.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Self::Int64(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return Self::Float64(f);
        }
        Self::Utf8(trimmed.to_owned())
    }

    /// Returns `true` for [`Value::Null`] and for blank strings.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Utf8(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Numeric coercion: numbers pass through, text is parsed after trimming.
    ///
    /// Returns `None` for nulls, booleans, unparseable text and non-finite numbers.
    pub fn to_f64(&self) -> Option<f64> {
        let v = match self {
            Self::Int64(i) => *i as f64,
            Self::Float64(f) => *f,
            Self::Utf8(s) => s.trim().parse::<f64>().ok()?,
            Self::Null | Self::Bool(_) => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Text form of a non-null value, `None` for nulls and blank strings.
    pub fn as_text(&self) -> Option<String> {
        if self.is_null() {
            return None;
        }
        match self {
            Self::Utf8(s) => Some(s.trim().to_owned()),
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Int64(i) => write!(f, "{i}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Utf8(s) => f.write_str(s),
        }
    }
}

/// In-memory raw record table.
///
/// Rows are stored row-major in the same order as `columns`. Rows shorter than `columns` are
/// read as if the missing trailing cells were [`Value::Null`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordTable {
    /// Ordered column names.
    pub columns: Vec<String>,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl RecordTable {
    /// Create a table from column names and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the index of a column by exact name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `(row, col)`; out-of-range cells read as [`Value::Null`].
    pub fn cell(&self, row: usize, col: usize) -> &Value {
        static NULL: Value = Value::Null;
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&NULL)
    }
}

/// One named table of records (a worksheet, or one uploaded dataset).
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Opaque sheet key, also the fallback test label.
    pub name: String,
    /// The sheet's records.
    pub table: RecordTable,
}

impl Sheet {
    /// Create a named sheet.
    pub fn new(name: impl Into<String>, table: RecordTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

/// Insertion-ordered collection of sheets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    /// Sheets in input order.
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create a workbook from sheets (order is preserved).
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Wrap a single table as a one-sheet workbook.
    pub fn single(name: impl Into<String>, table: RecordTable) -> Self {
        Self::new(vec![Sheet::new(name, table)])
    }

    /// Number of sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Returns `true` if the workbook has no sheets.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Look up a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}
