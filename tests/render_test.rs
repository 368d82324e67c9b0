//! Rendering tests.
//!
//! The formatter is the only thing between result sets and what the client
//! reads, so its output format is pinned down here: stable delimiters, the
//! NULL literal, binary placeholders, fixed temporal formats, and the
//! truncation marker.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use mysql_mcp_server::models::{CellValue, ColumnDescriptor, ColumnInfo, QueryOutcome, RowSet};
use mysql_mcp_server::render::{
    render_cell, render_columns, render_name_list, render_outcome, render_rowset,
};

fn sample_set() -> RowSet {
    RowSet {
        columns: vec![
            ColumnInfo::new("id", "INT"),
            ColumnInfo::new("email", "VARCHAR"),
            ColumnInfo::new("avatar", "BLOB"),
        ],
        rows: vec![
            vec![
                CellValue::Int(1),
                CellValue::Text("a@example.com".into()),
                CellValue::Bytes(512),
            ],
            vec![CellValue::Int(2), CellValue::Null, CellValue::Null],
        ],
        overflow: 0,
    }
}

#[test]
fn test_table_shape() {
    let out = render_rowset(&sample_set());
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "id\temail\tavatar");
    assert_eq!(lines[1], "1\ta@example.com\t<binary 512 bytes>");
    assert_eq!(lines[2], "2\tNULL\tNULL");
}

#[test]
fn test_null_never_renders_as_empty_string() {
    assert_eq!(render_cell(&CellValue::Null), "NULL");
    assert_ne!(render_cell(&CellValue::Null), render_cell(&CellValue::Text(String::new())));
}

#[test]
fn test_temporal_cells_use_fixed_formats() {
    let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
    let time = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
    assert_eq!(render_cell(&CellValue::Date(date)), "1999-12-31");
    assert_eq!(render_cell(&CellValue::Time(time)), "23:59:59");
    assert_eq!(
        render_cell(&CellValue::DateTime(NaiveDateTime::new(date, time))),
        "1999-12-31 23:59:59"
    );
}

#[test]
fn test_decimal_preserves_exact_representation() {
    assert_eq!(render_cell(&CellValue::Decimal("0.10".into())), "0.10");
    assert_eq!(render_cell(&CellValue::Decimal("-12.3400".into())), "-12.3400");
}

#[test]
fn test_truncation_marker_appended_once() {
    let mut set = sample_set();
    set.overflow = 9000;
    let out = render_rowset(&set);
    assert!(out.ends_with("(truncated, 9000 more rows)"));
    assert_eq!(out.matches("truncated").count(), 1);
}

#[test]
fn test_no_marker_without_overflow() {
    let out = render_rowset(&sample_set());
    assert!(!out.contains("truncated"));
}

#[test]
fn test_empty_result_set() {
    assert_eq!(render_rowset(&RowSet::empty()), "Empty set");
}

#[test]
fn test_outcome_rendering() {
    assert_eq!(render_outcome(&QueryOutcome::Affected(0)), "0 rows affected");
    assert_eq!(render_outcome(&QueryOutcome::Affected(1)), "1 row affected");
    assert_eq!(render_outcome(&QueryOutcome::Affected(42)), "42 rows affected");
    assert_eq!(
        render_outcome(&QueryOutcome::Rows(sample_set())),
        render_rowset(&sample_set())
    );
}

#[test]
fn test_name_list_one_per_line() {
    let names = names_of(&["alpha", "beta", "gamma"]);
    assert_eq!(render_name_list(&names), "alpha\nbeta\ngamma");
    assert_eq!(render_name_list(&[]), "Empty set");
}

fn names_of(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_describe_output_matches_mysql_cli() {
    let columns = vec![
        ColumnDescriptor {
            name: "id".into(),
            data_type: "bigint unsigned".into(),
            nullable: false,
            key: "PRI".into(),
            default: None,
            extra: "auto_increment".into(),
        },
        ColumnDescriptor {
            name: "note".into(),
            data_type: "text".into(),
            nullable: true,
            key: String::new(),
            default: None,
            extra: String::new(),
        },
    ];
    let out = render_columns(&columns);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Field\tType\tNull\tKey\tDefault\tExtra");
    assert_eq!(lines[1], "id\tbigint unsigned\tNO\tPRI\tNULL\tauto_increment");
    assert_eq!(lines[2], "note\ttext\tYES\t\tNULL\t");
}

#[test]
fn test_rendering_is_deterministic() {
    let set = sample_set();
    let first = render_rowset(&set);
    for _ in 0..3 {
        assert_eq!(render_rowset(&set), first);
    }
}
