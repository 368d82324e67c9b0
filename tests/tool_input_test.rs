//! Tool input handling tests.
//!
//! Covers deserialization of the tool input shapes and the search limit
//! policy: omitted, zero, and negative limits all fall back to the default,
//! and anything above the cap is clamped.

use mysql_mcp_server::models::{
    DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT, effective_search_limit,
};
use mysql_mcp_server::tools::query::QueryMysqlInput;
use mysql_mcp_server::tools::schema::{DescribeTableInput, ListTablesInput};
use mysql_mcp_server::tools::search::SearchTableInput;

#[test]
fn test_query_input_minimal() {
    let input: QueryMysqlInput =
        serde_json::from_str(r#"{"sql": "SHOW PROCESSLIST"}"#).unwrap();
    assert_eq!(input.sql, "SHOW PROCESSLIST");
}

#[test]
fn test_query_input_rejects_missing_sql() {
    assert!(serde_json::from_str::<QueryMysqlInput>(r#"{}"#).is_err());
}

#[test]
fn test_schema_inputs() {
    let list: ListTablesInput = serde_json::from_str(r#"{"database": "shop"}"#).unwrap();
    assert_eq!(list.database, "shop");

    let describe: DescribeTableInput =
        serde_json::from_str(r#"{"database": "shop", "table": "orders"}"#).unwrap();
    assert_eq!(describe.database, "shop");
    assert_eq!(describe.table, "orders");

    assert!(serde_json::from_str::<DescribeTableInput>(r#"{"database": "shop"}"#).is_err());
}

#[test]
fn test_search_input_limit_is_optional() {
    let input: SearchTableInput = serde_json::from_str(
        r#"{"database": "shop", "table": "users", "column": "email", "keyword": "gmail"}"#,
    )
    .unwrap();
    assert_eq!(input.limit, None);
}

#[test]
fn test_omitted_limit_uses_default() {
    assert_eq!(effective_search_limit(None), DEFAULT_SEARCH_LIMIT);
}

#[test]
fn test_zero_and_negative_limits_behave_like_omitted() {
    for bad in [0, -1, -20, i64::MIN] {
        assert_eq!(
            effective_search_limit(Some(bad)),
            effective_search_limit(None),
            "limit {} should fall back to the default",
            bad
        );
    }
}

#[test]
fn test_positive_limit_within_cap_passes_through() {
    assert_eq!(effective_search_limit(Some(1)), 1);
    assert_eq!(effective_search_limit(Some(500)), 500);
    assert_eq!(effective_search_limit(Some(1000)), MAX_SEARCH_LIMIT);
}

#[test]
fn test_oversized_limit_is_clamped() {
    assert_eq!(effective_search_limit(Some(1001)), MAX_SEARCH_LIMIT);
    assert_eq!(effective_search_limit(Some(5000)), MAX_SEARCH_LIMIT);
    assert_eq!(effective_search_limit(Some(i64::MAX)), MAX_SEARCH_LIMIT);
}
