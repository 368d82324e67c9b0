//! Result rendering.
//!
//! Pure functions from result structures to the text returned to MCP
//! clients. Rendering is deterministic: the same input always produces the
//! same output. NULL is rendered as the literal `NULL` so it cannot be
//! confused with an empty string, binary values show a length placeholder
//! instead of raw bytes, and temporal values use fixed formats.

use crate::models::{CellValue, ColumnDescriptor, QueryOutcome, RowSet};
use std::fmt::Write;

const NULL_LITERAL: &str = "NULL";
const DELIMITER: char = '\t';
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a single cell.
pub fn render_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Null => NULL_LITERAL.to_string(),
        CellValue::Bool(v) => v.to_string(),
        CellValue::Int(v) => v.to_string(),
        CellValue::UInt(v) => v.to_string(),
        CellValue::Float(v) => v.to_string(),
        CellValue::Decimal(s) => s.clone(),
        CellValue::Text(s) => s.clone(),
        CellValue::Bytes(len) => format!("<binary {} bytes>", len),
        CellValue::Date(v) => v.format(DATE_FORMAT).to_string(),
        CellValue::Time(v) => v.format(TIME_FORMAT).to_string(),
        CellValue::DateTime(v) => v.format(DATETIME_FORMAT).to_string(),
        CellValue::Json(s) => s.clone(),
    }
}

/// Render a row set as a tab-separated table: one header line, one line per
/// row, and a truncation marker when rows were dropped at the cap.
pub fn render_rowset(set: &RowSet) -> String {
    if set.is_empty() {
        if set.truncated() {
            return format!("(truncated, {} more rows)", set.overflow);
        }
        return "Empty set".to_string();
    }

    let mut out = String::new();
    let header: Vec<&str> = set.columns.iter().map(|c| c.name.as_str()).collect();
    out.push_str(&header.join(&DELIMITER.to_string()));

    for row in &set.rows {
        out.push('\n');
        let mut first = true;
        for cell in row {
            if !first {
                out.push(DELIMITER);
            }
            out.push_str(&render_cell(cell));
            first = false;
        }
    }

    if set.truncated() {
        let _ = write!(out, "\n(truncated, {} more rows)", set.overflow);
    }
    out
}

/// Render a statement outcome: a table for row-producing statements, an
/// affected-row summary for everything else.
pub fn render_outcome(outcome: &QueryOutcome) -> String {
    match outcome {
        QueryOutcome::Rows(set) => render_rowset(set),
        QueryOutcome::Affected(n) => {
            if *n == 1 {
                "1 row affected".to_string()
            } else {
                format!("{} rows affected", n)
            }
        }
    }
}

/// Render a plain list of names, one per line.
pub fn render_name_list(names: &[String]) -> String {
    if names.is_empty() {
        return "Empty set".to_string();
    }
    names.join("\n")
}

/// Render column definitions in the shape of `DESCRIBE`.
pub fn render_columns(columns: &[ColumnDescriptor]) -> String {
    if columns.is_empty() {
        return "Empty set".to_string();
    }

    let mut out = String::from("Field\tType\tNull\tKey\tDefault\tExtra");
    for col in columns {
        let _ = write!(
            out,
            "\n{}\t{}\t{}\t{}\t{}\t{}",
            col.name,
            col.data_type,
            if col.nullable { "YES" } else { "NO" },
            col.key,
            col.default.as_deref().unwrap_or(NULL_LITERAL),
            col.extra
        );
    }
    out
}
