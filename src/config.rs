//! Configuration handling for the MySQL MCP Server.
//!
//! Connection settings come from discrete environment variables (the
//! `MYSQL_*` family), server behavior from `MCP_*` variables; both can be
//! overridden on the command line. The password is never logged.

use crate::models::{DEFAULT_MAX_RESULT_ROWS, DEFAULT_QUERY_TIMEOUT_SECS};
use clap::{Parser, ValueEnum};
use sqlx::mysql::MySqlConnectOptions;
use std::time::Duration;

pub const DEFAULT_MYSQL_HOST: &str = "localhost";
pub const DEFAULT_MYSQL_PORT: u16 = 3306;
pub const DEFAULT_CHARSET: &str = "utf8mb4";
pub const DEFAULT_COLLATION: &str = "utf8mb4_unicode_ci";
pub const DEFAULT_SQL_MODE: &str = "TRADITIONAL";

pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_MCP_ENDPOINT: &str = "/";

/// Transport mode for the MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TransportMode {
    /// Standard input/output (for CLI integration)
    #[default]
    Stdio,
    /// Streamable HTTP (for web clients)
    Http,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdio => write!(f, "stdio"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Resolved MySQL connection settings. Immutable after load; owned by the
/// connection provider for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// Sensitive - excluded from logs
    pub password: String,
    pub database: String,
    pub charset: String,
    pub collation: String,
    pub sql_mode: String,
}

impl ConnectionSettings {
    /// Build the sqlx connect options for these settings. The session
    /// sql_mode is applied separately after connect (see the provider).
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .charset(&self.charset)
            .collation(&self.collation)
    }

    /// One-line summary safe for logging (no password).
    pub fn summary(&self) -> String {
        format!(
            "{}@{}:{}/{} charset={} collation={} sql_mode={}",
            self.user, self.host, self.port, self.database, self.charset, self.collation,
            self.sql_mode
        )
    }
}

/// Configuration for the MySQL MCP Server.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mysql-mcp-server",
    about = "MCP server exposing MySQL inspection and query tools to AI assistants",
    version,
    author
)]
pub struct Config {
    /// MySQL server hostname
    #[arg(long, default_value = DEFAULT_MYSQL_HOST, env = "MYSQL_HOST")]
    pub host: String,

    /// MySQL server port
    #[arg(long, default_value_t = DEFAULT_MYSQL_PORT, env = "MYSQL_PORT")]
    pub port: u16,

    /// MySQL user name
    #[arg(long, env = "MYSQL_USER")]
    pub user: String,

    /// MySQL password
    #[arg(long, env = "MYSQL_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Default database for this connection
    #[arg(long, env = "MYSQL_DATABASE")]
    pub database: String,

    /// Connection character set
    #[arg(long, default_value = DEFAULT_CHARSET, env = "MYSQL_CHARSET")]
    pub charset: String,

    /// Connection collation (utf8mb4_unicode_ci avoids utf8mb4_0900_ai_ci
    /// issues with older MySQL versions)
    #[arg(long, default_value = DEFAULT_COLLATION, env = "MYSQL_COLLATION")]
    pub collation: String,

    /// Session sql_mode
    #[arg(long, default_value = DEFAULT_SQL_MODE, env = "MYSQL_SQL_MODE")]
    pub sql_mode: String,

    /// Transport mode (stdio or http)
    #[arg(short, long, value_enum, default_value = "stdio", env = "MCP_TRANSPORT")]
    pub transport: TransportMode,

    /// HTTP host to bind to (only used with http transport)
    #[arg(long, default_value = DEFAULT_HTTP_HOST, env = "MCP_HTTP_HOST")]
    pub http_host: String,

    /// HTTP port to bind to (only used with http transport)
    #[arg(long, default_value_t = DEFAULT_HTTP_PORT, env = "MCP_HTTP_PORT")]
    pub http_port: u16,

    /// MCP endpoint path (only used with http transport)
    #[arg(long, default_value = DEFAULT_MCP_ENDPOINT, env = "MCP_ENDPOINT")]
    pub mcp_endpoint: String,

    /// Per-statement execution timeout in seconds
    #[arg(long, default_value_t = DEFAULT_QUERY_TIMEOUT_SECS, env = "MCP_QUERY_TIMEOUT")]
    pub query_timeout: u64,

    /// Maximum rows rendered per result set; larger results are truncated
    /// with an explicit marker. Must be at least 1.
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_RESULT_ROWS,
        env = "MCP_MAX_ROWS",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_rows: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "MCP_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "MCP_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Extract the resolved connection settings.
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
            charset: self.charset.clone(),
            collation: self.collation.clone(),
            sql_mode: self.sql_mode.clone(),
        }
    }

    /// Get the HTTP bind address.
    pub fn http_bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Get the query timeout as a Duration.
    pub fn query_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.query_timeout)
    }
}
