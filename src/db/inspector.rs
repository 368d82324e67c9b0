//! Schema inspection.
//!
//! Read-only lookups against `information_schema` and `SHOW DATABASES`.
//! Schema and table names are always bound parameters scoped per query;
//! the session default database is never switched, so concurrent tool
//! calls cannot leak context into each other.

use crate::error::ServerResult;
use crate::models::ColumnDescriptor;
use sqlx::mysql::MySqlPool;
use sqlx::Row;
use tracing::debug;

mod queries {
    pub const LIST_DATABASES: &str = "SHOW DATABASES";

    pub const LIST_TABLES: &str = r#"
        SELECT CONVERT(TABLE_NAME USING utf8) AS TABLE_NAME
        FROM information_schema.TABLES
        WHERE TABLE_SCHEMA = ?
        ORDER BY TABLE_NAME
        "#;

    pub const DESCRIBE_COLUMNS: &str = r#"
        SELECT
            CONVERT(COLUMN_NAME USING utf8) AS COLUMN_NAME,
            CONVERT(COLUMN_TYPE USING utf8) AS COLUMN_TYPE,
            CONVERT(IS_NULLABLE USING utf8) AS IS_NULLABLE,
            CONVERT(COLUMN_KEY USING utf8) AS COLUMN_KEY,
            CONVERT(COLUMN_DEFAULT USING utf8) AS COLUMN_DEFAULT,
            CONVERT(EXTRA USING utf8) AS EXTRA
        FROM information_schema.columns
        WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
        ORDER BY ORDINAL_POSITION
        "#;
}

pub struct SchemaInspector;

impl SchemaInspector {
    /// All databases visible to the configured account.
    pub async fn list_databases(pool: &MySqlPool) -> ServerResult<Vec<String>> {
        let rows = sqlx::query(queries::LIST_DATABASES).fetch_all(pool).await?;
        let names = rows
            .iter()
            .map(|row| row.try_get::<String, _>(0))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = names.len(), "Listed databases");
        Ok(names)
    }

    /// Tables and views in the named database, sorted by name.
    pub async fn list_tables(pool: &MySqlPool, database: &str) -> ServerResult<Vec<String>> {
        let rows = sqlx::query(queries::LIST_TABLES)
            .bind(database)
            .fetch_all(pool)
            .await?;
        let names = rows
            .iter()
            .map(|row| row.try_get::<String, _>("TABLE_NAME"))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(database, count = names.len(), "Listed tables");
        Ok(names)
    }

    /// Column definitions for one table, in ordinal order. An unknown table
    /// simply yields no columns; callers decide how to report that.
    pub async fn describe_table(
        pool: &MySqlPool,
        database: &str,
        table: &str,
    ) -> ServerResult<Vec<ColumnDescriptor>> {
        let rows = sqlx::query(queries::DESCRIBE_COLUMNS)
            .bind(database)
            .bind(table)
            .fetch_all(pool)
            .await?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in &rows {
            let nullable: String = row.try_get("IS_NULLABLE")?;
            columns.push(ColumnDescriptor {
                name: row.try_get("COLUMN_NAME")?,
                data_type: row.try_get("COLUMN_TYPE")?,
                nullable: nullable == "YES",
                key: row.try_get("COLUMN_KEY")?,
                default: row.try_get::<Option<String>, _>("COLUMN_DEFAULT")?,
                extra: row.try_get("EXTRA")?,
            });
        }
        debug!(database, table, count = columns.len(), "Described table");
        Ok(columns)
    }
}
