//! Generic SQL execution tool.
//!
//! `query_mysql` accepts any SQL statement and reports whatever the server
//! sends back. There is no client-side classification of the statement;
//! SELECTs yield a rendered table, mutations yield an affected-row count,
//! and the distinction is made from the result, not the SQL text.

use crate::db::{ConnectionProvider, QueryExecutor};
use crate::error::{ServerError, ServerResult};
use crate::render;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

/// Input for the query_mysql tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryMysqlInput {
    /// SQL statement to execute
    pub sql: String,
}

pub struct QueryToolHandler {
    provider: Arc<ConnectionProvider>,
    executor: QueryExecutor,
}

impl QueryToolHandler {
    pub fn new(provider: Arc<ConnectionProvider>, executor: QueryExecutor) -> Self {
        Self { provider, executor }
    }

    pub async fn run(&self, input: QueryMysqlInput) -> ServerResult<String> {
        let sql = input.sql.trim();
        if sql.is_empty() {
            return Err(ServerError::argument("sql is required"));
        }

        let pool = self.provider.acquire().await?;
        let outcome = self.executor.run_sql(&pool, sql).await?;
        Ok(render::render_outcome(&outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_requires_only_sql() {
        let input: QueryMysqlInput =
            serde_json::from_str(r#"{"sql": "SELECT 1"}"#).unwrap();
        assert_eq!(input.sql, "SELECT 1");
    }

    #[test]
    fn test_missing_sql_fails_deserialization() {
        assert!(serde_json::from_str::<QueryMysqlInput>("{}").is_err());
    }
}
