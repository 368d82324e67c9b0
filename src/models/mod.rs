//! Data models for the MySQL MCP Server.

pub mod rowset;

pub use rowset::{CellValue, ColumnDescriptor, ColumnInfo, QueryOutcome, RowSet};

/// Default row limit for search_table.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Hard ceiling for search_table limits. Values above this are clamped,
/// not rejected.
pub const MAX_SEARCH_LIMIT: u32 = 1000;

/// Default maximum number of rows rendered for any result set. Results
/// beyond this are truncated with an explicit marker.
pub const DEFAULT_MAX_RESULT_ROWS: u32 = 1000;

/// Default per-statement execution timeout in seconds.
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;

/// Resolve the effective search limit from a caller-supplied value.
///
/// Missing or non-positive values fall back to [`DEFAULT_SEARCH_LIMIT`];
/// values above [`MAX_SEARCH_LIMIT`] are clamped.
pub fn effective_search_limit(requested: Option<i64>) -> u32 {
    match requested {
        Some(l) if l > 0 => (l as u64).min(MAX_SEARCH_LIMIT as u64) as u32,
        _ => DEFAULT_SEARCH_LIMIT,
    }
}
