//! MySQL MCP Server Library
//!
//! This library provides MCP (Model Context Protocol) tools for AI assistants
//! to inspect and query a single configured MySQL database.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod render;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use error::ServerError;
pub use mcp::MySqlService;
