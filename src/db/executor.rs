//! Statement execution.
//!
//! Runs caller-supplied SQL and the generated search queries against the
//! shared connection. Result shape is determined by what the server sends
//! back, not by inspecting the SQL text: statements that produce rows become
//! a [`RowSet`], everything else reports affected-row counts. Row output is
//! capped at a configured maximum; the remainder of the stream is drained so
//! the overflow count is exact.

use crate::db::rows::rows_to_rowset;
use crate::error::{ServerError, ServerResult};
use crate::models::{ColumnInfo, QueryOutcome, RowSet};
use futures_util::StreamExt;
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::{Column, Executor, TypeInfo};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct QueryExecutor {
    timeout: Duration,
    max_rows: u32,
}

impl QueryExecutor {
    pub fn new(timeout: Duration, max_rows: u32) -> Self {
        Self { timeout, max_rows }
    }

    /// Execute a raw SQL statement. The statement is logged before it runs
    /// so mutations leave an audit trail even when they fail.
    pub async fn run_sql(&self, pool: &MySqlPool, sql: &str) -> ServerResult<QueryOutcome> {
        info!(sql = %sql, "Executing statement");

        let fetch = async {
            let mut stream = pool.fetch_many(sql);
            let mut rows: Vec<MySqlRow> = Vec::new();
            let mut affected: u64 = 0;
            let mut overflow: u64 = 0;

            while let Some(item) = stream.next().await {
                match item? {
                    sqlx::Either::Left(done) => {
                        affected += done.rows_affected();
                    }
                    sqlx::Either::Right(row) => {
                        if rows.len() < self.max_rows as usize {
                            rows.push(row);
                        } else {
                            overflow += 1;
                        }
                    }
                }
            }
            Ok::<_, sqlx::Error>((rows, affected, overflow))
        };

        let (rows, affected, overflow) = tokio::time::timeout(self.timeout, fetch)
            .await
            .map_err(|_| self.timeout_error())??;

        if rows.is_empty() && overflow == 0 {
            if let Some(set) = self.empty_row_shape(pool, sql).await {
                debug!("Statement returned an empty result set");
                return Ok(QueryOutcome::Rows(set));
            }
            debug!(rows_affected = affected, "Statement complete");
            return Ok(QueryOutcome::Affected(affected));
        }

        let set = rows_to_rowset(&rows, overflow)?;
        debug!(
            rows = set.row_count(),
            overflow = set.overflow,
            "Statement returned rows"
        );
        Ok(QueryOutcome::Rows(set))
    }

    /// Run a keyword search against one column of a table. Identifiers must
    /// already be validated; the keyword and limit are bound parameters and
    /// never interpolated into the SQL text. The result-row cap applies here
    /// the same as in [`run_sql`].
    pub async fn search(
        &self,
        pool: &MySqlPool,
        database: &str,
        table: &str,
        column: &str,
        keyword: &str,
        limit: u32,
    ) -> ServerResult<RowSet> {
        let sql = format!(
            "SELECT * FROM `{}`.`{}` WHERE `{}` LIKE ? LIMIT ?",
            database, table, column
        );
        let pattern = format!("%{}%", keyword);
        info!(database, table, column, limit, "Searching table");

        let mut rows: Vec<MySqlRow> = tokio::time::timeout(
            self.timeout,
            sqlx::query(&sql).bind(&pattern).bind(limit).fetch_all(pool),
        )
        .await
        .map_err(|_| self.timeout_error())??;

        let (keep, overflow) = self.cap_overflow(rows.len());
        rows.truncate(keep);
        rows_to_rowset(&rows, overflow)
    }

    /// How many of `fetched` rows survive the row cap, and how many are
    /// dropped into the overflow count.
    fn cap_overflow(&self, fetched: usize) -> (usize, u64) {
        let keep = fetched.min(self.max_rows as usize);
        (keep, (fetched - keep) as u64)
    }

    /// Resolve a no-row outcome. An empty SELECT and a mutation both come
    /// back without row data; preparing the statement reveals whether it is
    /// row-shaped (the column-metadata check the wire protocol offers). A
    /// failed prepare falls back to the affected-row report.
    async fn empty_row_shape(&self, pool: &MySqlPool, sql: &str) -> Option<RowSet> {
        match pool.describe(sql).await {
            Ok(described) if !described.columns().is_empty() => Some(RowSet {
                columns: described
                    .columns()
                    .iter()
                    .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                    .collect(),
                rows: Vec::new(),
                overflow: 0,
            }),
            _ => None,
        }
    }

    fn timeout_error(&self) -> ServerError {
        ServerError::query(
            format!("Query exceeded the {}s time limit", self.timeout.as_secs()),
            None,
            "Narrow the query or raise the configured timeout",
        )
    }
}
