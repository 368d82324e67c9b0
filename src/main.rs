//! MySQL MCP Server - Main entry point.
//!
//! Exposes MCP (Model Context Protocol) tools that let AI assistants query
//! and explore a single MySQL server.

use clap::Parser;
use mysql_mcp_server::config::{Config, TransportMode};
use mysql_mcp_server::db::{ConnectionProvider, QueryExecutor};
use mysql_mcp_server::transport::{HttpTransport, StdioTransport, Transport};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from command line and environment
    let config = Config::parse();

    init_tracing(&config);

    let settings = config.connection_settings();
    info!(
        transport = %config.transport,
        connection = %settings.summary(),
        "Starting MySQL MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let provider = Arc::new(ConnectionProvider::new(settings));

    // Verify connectivity before accepting any tool calls. A server that
    // cannot reach its database should fail at startup, not on first use.
    match provider.probe().await {
        Ok(version) => info!(server_version = %version, "Connected to MySQL"),
        Err(e) => {
            error!(error = %e, "Startup connection check failed");
            eprintln!("Error: {}", e);
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Hint: {}", suggestion);
            }
            std::process::exit(1);
        }
    }

    let executor = QueryExecutor::new(config.query_timeout_duration(), config.max_rows);

    let result = match config.transport {
        TransportMode::Stdio => {
            info!("Using stdio transport");
            let transport = StdioTransport::new(provider, executor);
            transport.run().await
        }
        TransportMode::Http => {
            info!(
                host = %config.http_host,
                port = config.http_port,
                endpoint = %config.mcp_endpoint,
                "Using HTTP transport"
            );
            let transport = HttpTransport::new(
                provider,
                executor,
                &config.http_host,
                config.http_port,
                &config.mcp_endpoint,
            );
            transport.run().await
        }
    };

    if let Err(e) = result {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
