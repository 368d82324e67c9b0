//! Connection provider.
//!
//! Owns the single MySQL connection the server operates on. The connection
//! is opened lazily on first use and handed out as a one-connection sqlx
//! pool: the pool serializes concurrent tool calls on the shared connection,
//! pings before every acquisition, and replaces a dead connection with one
//! reconnect attempt. If that attempt fails the error surfaces to the
//! dispatcher; the process stays alive.

use crate::config::ConnectionSettings;
use crate::error::{ServerError, ServerResult};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ConnectionProvider {
    settings: ConnectionSettings,
    pool: RwLock<Option<MySqlPool>>,
}

impl ConnectionProvider {
    /// Create a provider. Does not connect; the first acquisition does.
    pub fn new(settings: ConnectionSettings) -> Self {
        Self {
            settings,
            pool: RwLock::new(None),
        }
    }

    /// The settings this provider was built from.
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// Get the live connection handle, opening it if necessary.
    ///
    /// The returned pool clone shares the underlying connection; dropping it
    /// is cheap. A closed pool (after shutdown or a failed open) is replaced
    /// on the next call.
    pub async fn acquire(&self) -> ServerResult<MySqlPool> {
        {
            let guard = self.pool.read().await;
            if let Some(pool) = guard.as_ref() {
                if !pool.is_closed() {
                    return Ok(pool.clone());
                }
            }
        }

        let mut guard = self.pool.write().await;
        // Another task may have opened the connection while we waited.
        if let Some(pool) = guard.as_ref() {
            if !pool.is_closed() {
                return Ok(pool.clone());
            }
        }

        debug!(
            host = %self.settings.host,
            port = self.settings.port,
            database = %self.settings.database,
            "Opening MySQL connection"
        );
        let pool = self.open().await?;
        *guard = Some(pool.clone());
        Ok(pool)
    }

    async fn open(&self) -> ServerResult<MySqlPool> {
        let sql_mode = self.settings.sql_mode.clone();
        MySqlPoolOptions::new()
            .max_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .after_connect(move |conn, _meta| {
                let sql_mode = sql_mode.clone();
                Box::pin(async move {
                    sqlx::query("SET SESSION sql_mode = ?")
                        .bind(sql_mode)
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect_with(self.settings.connect_options())
            .await
            .map_err(|e| {
                ServerError::connection(
                    format!(
                        "Cannot reach MySQL at {}:{}: {}",
                        self.settings.host, self.settings.port, e
                    ),
                    "Check that the server is running and the credentials are correct",
                )
            })
    }

    /// Connectivity probe: opens the connection and reports the server
    /// version. Used at startup to fail fast on a misconfigured database.
    pub async fn probe(&self) -> ServerResult<String> {
        let pool = self.acquire().await?;
        let version: (String,) = sqlx::query_as("SELECT VERSION()")
            .fetch_one(&pool)
            .await?;
        info!(server_version = %version.0, "MySQL connection verified");
        Ok(version.0)
    }

    /// Close the connection. A later acquisition reopens it.
    pub async fn close(&self) {
        let pool = self.pool.write().await.take();
        if let Some(pool) = pool {
            info!("Closing MySQL connection");
            pool.close().await;
        }
    }
}

impl std::fmt::Debug for ConnectionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionProvider")
            .field("settings", &self.settings.summary())
            .finish()
    }
}
