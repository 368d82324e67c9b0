//! MCP tool handlers.
//!
//! Each handler owns the logic for one or more tools and returns plain
//! `ServerResult<String>`; the MCP service layer converts the result into a
//! protocol response. Identifier arguments pass through the allow-list in
//! [`identifier`] before any SQL is built.

pub mod identifier;
pub mod query;
pub mod schema;
pub mod search;

pub use query::{QueryMysqlInput, QueryToolHandler};
pub use schema::{DescribeTableInput, ListTablesInput, SchemaToolHandler};
pub use search::{SearchTableInput, SearchToolHandler};
