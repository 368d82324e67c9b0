//! Row decoding.
//!
//! Maps MySQL wire values into [`CellValue`]s in two phases: the column type
//! name is classified into a [`CellKind`], and a kind-specific decoder pulls
//! the value out of the row. DECIMAL columns are read as their exact string
//! representation rather than a lossy float.

use crate::error::{ServerError, ServerResult};
use crate::models::{CellValue, ColumnInfo, RowSet};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::mysql::{MySqlRow, MySqlTypeInfo, MySqlValueRef};
use sqlx::{Column, Decode, Row, Type, TypeInfo};

/// Logical category for MySQL column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Integer,
    Unsigned,
    Float,
    Decimal,
    Boolean,
    DateTime,
    Date,
    Time,
    Json,
    Binary,
    Text,
}

/// Classify a MySQL type name into a decode category.
pub fn classify_type(type_name: &str) -> CellKind {
    let lower = type_name.to_lowercase();

    if lower.contains("decimal") || lower.contains("numeric") {
        return CellKind::Decimal;
    }
    if lower == "bool" || lower == "boolean" {
        return CellKind::Boolean;
    }
    // Order matters: "datetime" contains both "date" and "time".
    if lower.contains("datetime") || lower.contains("timestamp") {
        return CellKind::DateTime;
    }
    if lower.contains("date") {
        return CellKind::Date;
    }
    if lower.contains("time") && !lower.contains("year") {
        return CellKind::Time;
    }
    if lower.contains("int") || lower.contains("year") {
        if lower.contains("unsigned") {
            return CellKind::Unsigned;
        }
        return CellKind::Integer;
    }
    if lower.contains("float") || lower.contains("double") || lower == "real" {
        return CellKind::Float;
    }
    if lower == "json" {
        return CellKind::Json;
    }
    if lower.contains("blob") || lower.contains("binary") || lower.contains("bit") {
        return CellKind::Binary;
    }
    CellKind::Text
}

/// Wrapper for raw DECIMAL/NUMERIC values as strings, preserving the exact
/// database representation.
#[derive(Debug)]
pub struct RawDecimal(pub String);

impl Type<sqlx::MySql> for RawDecimal {
    fn type_info() -> MySqlTypeInfo {
        <String as Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &MySqlTypeInfo) -> bool {
        let name = ty.name().to_lowercase();
        name.contains("decimal") || name.contains("numeric")
    }
}

impl<'r> Decode<'r, sqlx::MySql> for RawDecimal {
    fn decode(value: MySqlValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as Decode<sqlx::MySql>>::decode(value)?;
        Ok(RawDecimal(s.to_string()))
    }
}

/// Convert fetched rows into a [`RowSet`]. Column metadata comes from the
/// first row; an empty slice yields an empty set.
pub fn rows_to_rowset(rows: &[MySqlRow], overflow: u64) -> ServerResult<RowSet> {
    let Some(first) = rows.first() else {
        // Column metadata comes from rows, but a dropped remainder must
        // still surface in the truncation marker.
        return Ok(RowSet {
            columns: Vec::new(),
            rows: Vec::new(),
            overflow,
        });
    };

    let columns: Vec<ColumnInfo> = first
        .columns()
        .iter()
        .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
        .collect();
    let kinds: Vec<CellKind> = first
        .columns()
        .iter()
        .map(|col| classify_type(col.type_info().name()))
        .collect();

    let mut decoded = Vec::with_capacity(rows.len());
    for row in rows {
        let mut cells = Vec::with_capacity(columns.len());
        for (idx, kind) in kinds.iter().enumerate() {
            cells.push(decode_cell(row, idx, *kind, &columns[idx])?);
        }
        decoded.push(cells);
    }

    Ok(RowSet {
        columns,
        rows: decoded,
        overflow,
    })
}

fn decode_cell(
    row: &MySqlRow,
    idx: usize,
    kind: CellKind,
    column: &ColumnInfo,
) -> ServerResult<CellValue> {
    match kind {
        CellKind::Decimal => decode_decimal(row, idx),
        CellKind::Integer => decode_integer(row, idx),
        CellKind::Unsigned => decode_unsigned(row, idx),
        CellKind::Boolean => decode_boolean(row, idx),
        CellKind::Float => decode_float(row, idx),
        CellKind::DateTime => decode_datetime(row, idx),
        CellKind::Date => decode_date(row, idx),
        CellKind::Time => decode_time(row, idx),
        CellKind::Json => decode_json(row, idx),
        CellKind::Binary => decode_binary(row, idx),
        CellKind::Text => decode_text(row, idx),
    }
    .ok_or_else(|| {
        ServerError::format_error(format!(
            "Cannot decode column '{}' of type {}",
            column.name, column.type_name
        ))
    })
}

fn decode_decimal(row: &MySqlRow, idx: usize) -> Option<CellValue> {
    match row.try_get::<Option<RawDecimal>, _>(idx) {
        Ok(Some(v)) => Some(CellValue::Decimal(v.0)),
        Ok(None) => Some(CellValue::Null),
        Err(_) => None,
    }
}

fn decode_integer(row: &MySqlRow, idx: usize) -> Option<CellValue> {
    // Check NULL first
    if let Ok(None) = row.try_get::<Option<i64>, _>(idx) {
        return Some(CellValue::Null);
    }
    if let Ok(Some(v)) = row.try_get::<Option<i8>, _>(idx) {
        return Some(CellValue::Int(v as i64));
    }
    if let Ok(Some(v)) = row.try_get::<Option<i16>, _>(idx) {
        return Some(CellValue::Int(v as i64));
    }
    if let Ok(Some(v)) = row.try_get::<Option<i32>, _>(idx) {
        return Some(CellValue::Int(v as i64));
    }
    if let Ok(Some(v)) = row.try_get::<Option<i64>, _>(idx) {
        return Some(CellValue::Int(v));
    }
    // TINYINT(1) decodes as bool in some configurations.
    if let Ok(Some(v)) = row.try_get::<Option<bool>, _>(idx) {
        return Some(CellValue::Bool(v));
    }
    None
}

fn decode_unsigned(row: &MySqlRow, idx: usize) -> Option<CellValue> {
    if let Ok(None) = row.try_get::<Option<u64>, _>(idx) {
        return Some(CellValue::Null);
    }
    if let Ok(Some(v)) = row.try_get::<Option<u8>, _>(idx) {
        return Some(CellValue::UInt(v as u64));
    }
    if let Ok(Some(v)) = row.try_get::<Option<u16>, _>(idx) {
        return Some(CellValue::UInt(v as u64));
    }
    if let Ok(Some(v)) = row.try_get::<Option<u32>, _>(idx) {
        return Some(CellValue::UInt(v as u64));
    }
    if let Ok(Some(v)) = row.try_get::<Option<u64>, _>(idx) {
        return Some(CellValue::UInt(v));
    }
    None
}

fn decode_boolean(row: &MySqlRow, idx: usize) -> Option<CellValue> {
    match row.try_get::<Option<bool>, _>(idx) {
        Ok(Some(v)) => Some(CellValue::Bool(v)),
        Ok(None) => Some(CellValue::Null),
        Err(_) => None,
    }
}

fn decode_float(row: &MySqlRow, idx: usize) -> Option<CellValue> {
    if let Ok(None) = row.try_get::<Option<f64>, _>(idx) {
        return Some(CellValue::Null);
    }
    if let Ok(Some(v)) = row.try_get::<Option<f64>, _>(idx) {
        return Some(CellValue::Float(v));
    }
    if let Ok(Some(v)) = row.try_get::<Option<f32>, _>(idx) {
        return Some(CellValue::Float(v as f64));
    }
    None
}

fn decode_datetime(row: &MySqlRow, idx: usize) -> Option<CellValue> {
    if let Ok(Some(v)) = row.try_get::<Option<NaiveDateTime>, _>(idx) {
        return Some(CellValue::DateTime(v));
    }
    // TIMESTAMP columns come back as timezone-aware values.
    if let Ok(Some(v)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(idx) {
        return Some(CellValue::DateTime(v.naive_utc()));
    }
    if let Ok(None) = row.try_get::<Option<NaiveDateTime>, _>(idx) {
        return Some(CellValue::Null);
    }
    None
}

fn decode_date(row: &MySqlRow, idx: usize) -> Option<CellValue> {
    match row.try_get::<Option<NaiveDate>, _>(idx) {
        Ok(Some(v)) => Some(CellValue::Date(v)),
        Ok(None) => Some(CellValue::Null),
        Err(_) => None,
    }
}

fn decode_time(row: &MySqlRow, idx: usize) -> Option<CellValue> {
    match row.try_get::<Option<NaiveTime>, _>(idx) {
        Ok(Some(v)) => Some(CellValue::Time(v)),
        Ok(None) => Some(CellValue::Null),
        Err(_) => None,
    }
}

fn decode_json(row: &MySqlRow, idx: usize) -> Option<CellValue> {
    match row.try_get::<Option<serde_json::Value>, _>(idx) {
        Ok(Some(v)) => Some(CellValue::Json(v.to_string())),
        Ok(None) => Some(CellValue::Null),
        Err(_) => None,
    }
}

fn decode_binary(row: &MySqlRow, idx: usize) -> Option<CellValue> {
    match row.try_get::<Option<Vec<u8>>, _>(idx) {
        Ok(Some(v)) => Some(CellValue::Bytes(v.len())),
        Ok(None) => Some(CellValue::Null),
        Err(_) => None,
    }
}

fn decode_text(row: &MySqlRow, idx: usize) -> Option<CellValue> {
    if let Ok(v) = row.try_get::<Option<String>, _>(idx) {
        return Some(match v {
            Some(s) => CellValue::Text(s),
            None => CellValue::Null,
        });
    }
    // ENUM/SET and friends sometimes only decode as raw bytes.
    if let Ok(Some(v)) = row.try_get::<Option<Vec<u8>>, _>(idx) {
        return Some(match String::from_utf8(v) {
            Ok(s) => CellValue::Text(s),
            Err(e) => CellValue::Bytes(e.as_bytes().len()),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_numeric_types() {
        assert_eq!(classify_type("INT"), CellKind::Integer);
        assert_eq!(classify_type("BIGINT"), CellKind::Integer);
        assert_eq!(classify_type("BIGINT UNSIGNED"), CellKind::Unsigned);
        assert_eq!(classify_type("DECIMAL"), CellKind::Decimal);
        assert_eq!(classify_type("DOUBLE"), CellKind::Float);
        assert_eq!(classify_type("YEAR"), CellKind::Integer);
    }

    #[test]
    fn test_classify_temporal_types() {
        assert_eq!(classify_type("DATETIME"), CellKind::DateTime);
        assert_eq!(classify_type("TIMESTAMP"), CellKind::DateTime);
        assert_eq!(classify_type("DATE"), CellKind::Date);
        assert_eq!(classify_type("TIME"), CellKind::Time);
    }

    #[test]
    fn test_classify_text_and_binary() {
        assert_eq!(classify_type("VARCHAR"), CellKind::Text);
        assert_eq!(classify_type("ENUM"), CellKind::Text);
        assert_eq!(classify_type("JSON"), CellKind::Json);
        assert_eq!(classify_type("BLOB"), CellKind::Binary);
        assert_eq!(classify_type("VARBINARY"), CellKind::Binary);
        assert_eq!(classify_type("BOOLEAN"), CellKind::Boolean);
    }

    #[test]
    fn test_empty_rows_give_empty_set() {
        let set = rows_to_rowset(&[], 0).unwrap();
        assert!(set.is_empty());
        assert!(!set.truncated());
    }

    #[test]
    fn test_empty_rows_keep_overflow_count() {
        let set = rows_to_rowset(&[], 5).unwrap();
        assert!(set.is_empty());
        assert!(set.truncated());
        assert_eq!(set.overflow, 5);
    }
}
