//! Keyword search tool.
//!
//! `search_table` runs a `LIKE '%keyword%'` match against a single column.
//! The three identifiers are validated before the statement is assembled;
//! the keyword and the row limit are always bound parameters, so a keyword
//! containing quotes or SQL fragments matches literally instead of
//! executing.

use crate::db::{ConnectionProvider, QueryExecutor};
use crate::error::{ServerError, ServerResult};
use crate::models::effective_search_limit;
use crate::render;
use crate::tools::identifier;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

/// Input for the search_table tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchTableInput {
    /// Database containing the table
    pub database: String,
    /// Table to search
    pub table: String,
    /// Column to match the keyword against
    pub column: String,
    /// Substring to search for (matched case-insensitively per collation)
    pub keyword: String,
    /// Maximum rows to return. Default: 20, max: 1000; zero or negative values use the default
    #[serde(default)]
    pub limit: Option<i64>,
}

pub struct SearchToolHandler {
    provider: Arc<ConnectionProvider>,
    executor: QueryExecutor,
}

impl SearchToolHandler {
    pub fn new(provider: Arc<ConnectionProvider>, executor: QueryExecutor) -> Self {
        Self { provider, executor }
    }

    pub async fn run(&self, input: SearchTableInput) -> ServerResult<String> {
        let database = identifier::validate("database", &input.database)?;
        let table = identifier::validate("table", &input.table)?;
        let column = identifier::validate("column", &input.column)?;
        if input.keyword.is_empty() {
            return Err(ServerError::argument("keyword is required"));
        }
        let limit = effective_search_limit(input.limit);

        let pool = self.provider.acquire().await?;
        let set = self
            .executor
            .search(&pool, database, table, column, &input.keyword, limit)
            .await?;
        Ok(render::render_rowset(&set))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_defaults_when_omitted() {
        let input: SearchTableInput = serde_json::from_str(
            r#"{"database": "shop", "table": "users", "column": "email", "keyword": "gmail"}"#,
        )
        .unwrap();
        assert_eq!(input.limit, None);
        assert_eq!(effective_search_limit(input.limit), 20);
    }

    #[test]
    fn test_explicit_limit_passes_through() {
        let input: SearchTableInput = serde_json::from_str(
            r#"{"database": "shop", "table": "users", "column": "email", "keyword": "x", "limit": 50}"#,
        )
        .unwrap();
        assert_eq!(effective_search_limit(input.limit), 50);
    }
}
