//! Result-set data models.
//!
//! A [`RowSet`] is the only shape query results travel in between the
//! executor and the formatter: ordered columns, ordered rows of decoded
//! cells, and a count of rows dropped by the truncation policy.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Metadata for one result column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Driver-reported type (e.g., "BIGINT", "VARCHAR", "DATETIME")
    pub type_name: String,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// One decoded column value.
///
/// Binary values carry only their length; raw bytes never reach the
/// formatter. Temporal values keep their chrono representation so the
/// formatter owns the textual rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// DECIMAL/NUMERIC kept as the exact database string
    Decimal(String),
    Text(String),
    /// Byte length only
    Bytes(usize),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Json(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Type name of this cell for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::DateTime(_) => "datetime",
            Self::Json(_) => "json",
        }
    }
}

/// An ordered result set. Rows hold cells in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSet {
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Vec<CellValue>>,
    /// Number of rows dropped beyond the row ceiling. Zero when complete.
    pub overflow: u64,
}

impl RowSet {
    /// Create an empty result set.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            overflow: 0,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn truncated(&self) -> bool {
        self.overflow > 0
    }
}

/// Outcome of an arbitrary SQL statement: a result set for SELECT-shaped
/// statements, an affected-row count for mutating ones. Determined by what
/// the server sent back, not by parsing the statement.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Rows(RowSet),
    Affected(u64),
}

/// One column descriptor from describe_table, in the database's natural
/// (ordinal) column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Full column type (e.g., "varchar(255)", "bigint unsigned")
    pub data_type: String,
    pub nullable: bool,
    /// Key kind: "PRI", "UNI", "MUL", or empty
    pub key: String,
    pub default: Option<String>,
    /// e.g., "auto_increment"
    pub extra: String,
}
