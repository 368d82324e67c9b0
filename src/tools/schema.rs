//! Schema inspection tools.
//!
//! Implements `list_databases`, `list_tables`, and `describe_table`. Table
//! and database names are validated before they reach the inspector, and the
//! inspector scopes every lookup with bound schema parameters instead of
//! switching the session's default database.

use crate::db::{ConnectionProvider, SchemaInspector};
use crate::error::ServerResult;
use crate::render;
use crate::tools::identifier;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

/// Input for the list_tables tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListTablesInput {
    /// Database to list tables from
    pub database: String,
}

/// Input for the describe_table tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DescribeTableInput {
    /// Database containing the table
    pub database: String,
    /// Table to describe
    pub table: String,
}

pub struct SchemaToolHandler {
    provider: Arc<ConnectionProvider>,
}

impl SchemaToolHandler {
    pub fn new(provider: Arc<ConnectionProvider>) -> Self {
        Self { provider }
    }

    pub async fn list_databases(&self) -> ServerResult<String> {
        let pool = self.provider.acquire().await?;
        let names = SchemaInspector::list_databases(&pool).await?;
        Ok(render::render_name_list(&names))
    }

    pub async fn list_tables(&self, input: ListTablesInput) -> ServerResult<String> {
        let database = identifier::validate("database", &input.database)?;
        let pool = self.provider.acquire().await?;
        let names = SchemaInspector::list_tables(&pool, database).await?;
        Ok(render::render_name_list(&names))
    }

    pub async fn describe_table(&self, input: DescribeTableInput) -> ServerResult<String> {
        let database = identifier::validate("database", &input.database)?;
        let table = identifier::validate("table", &input.table)?;
        let pool = self.provider.acquire().await?;
        let columns = SchemaInspector::describe_table(&pool, database, table).await?;
        if columns.is_empty() {
            return Ok(format!(
                "Table '{}.{}' has no columns or does not exist",
                database, table
            ));
        }
        Ok(render::render_columns(&columns))
    }
}
