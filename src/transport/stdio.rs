//! Stdio transport for the MCP server.
//!
//! Reads JSON-RPC messages from stdin and writes responses to stdout, the
//! standard mode for CLI-based MCP integrations.

use crate::db::{ConnectionProvider, QueryExecutor};
use crate::error::{ServerError, ServerResult};
use crate::mcp::MySqlService;
use crate::transport::{Transport, wait_for_signal};
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use tracing::info;

pub struct StdioTransport {
    provider: Arc<ConnectionProvider>,
    executor: QueryExecutor,
}

impl StdioTransport {
    pub fn new(provider: Arc<ConnectionProvider>, executor: QueryExecutor) -> Self {
        Self { provider, executor }
    }
}

impl Transport for StdioTransport {
    async fn run(&self) -> ServerResult<()> {
        info!("Starting MCP server with stdio transport");

        let service = MySqlService::new(self.provider.clone(), self.executor.clone());
        let running_service = service
            .serve(stdio())
            .await
            .map_err(|e| ServerError::internal(format!("Failed to start stdio transport: {}", e)))?;

        let shutdown_requested = tokio::select! {
            result = running_service.waiting() => {
                match result {
                    Ok(_quit_reason) => {
                        info!("Stdio transport completed normally");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Stdio transport error");
                        return Err(ServerError::internal(format!(
                            "Stdio transport error: {}",
                            e
                        )));
                    }
                }
                false
            }
            _ = wait_for_signal() => {
                info!("Shutdown signal received (send again to force exit)");
                true
            }
        };

        if shutdown_requested {
            tokio::spawn(async {
                wait_for_signal().await;
                tracing::warn!("Received second signal, forcing immediate exit");
                std::process::exit(1);
            });
        }

        info!("Closing database connection");
        self.provider.close().await;

        if shutdown_requested {
            // tokio::select! cannot interrupt a blocking stdin read, so a
            // clean exit here is the only way to actually stop the process.
            info!("Exiting process");
            std::process::exit(0);
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "stdio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ConnectionSettings, DEFAULT_CHARSET, DEFAULT_COLLATION, DEFAULT_MYSQL_HOST,
        DEFAULT_MYSQL_PORT, DEFAULT_SQL_MODE,
    };
    use std::time::Duration;

    #[test]
    fn test_stdio_transport_creation() {
        let settings = ConnectionSettings {
            host: DEFAULT_MYSQL_HOST.to_string(),
            port: DEFAULT_MYSQL_PORT,
            user: "reader".to_string(),
            password: "pw".to_string(),
            database: "app_db".to_string(),
            charset: DEFAULT_CHARSET.to_string(),
            collation: DEFAULT_COLLATION.to_string(),
            sql_mode: DEFAULT_SQL_MODE.to_string(),
        };
        let provider = Arc::new(ConnectionProvider::new(settings));
        let executor = QueryExecutor::new(Duration::from_secs(30), 1000);
        let transport = StdioTransport::new(provider, executor);
        assert_eq!(transport.name(), "stdio");
    }
}
