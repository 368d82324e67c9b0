//! Database access layer.
//!
//! This module provides:
//! - Connection acquisition with reconnect-on-demand (`provider`)
//! - Statement execution with row limiting and timeouts (`executor`)
//! - Schema metadata queries (`inspector`)
//! - Row decoding into the result-set model (`rows`)

pub mod executor;
pub mod inspector;
pub mod provider;
pub mod rows;

pub use executor::QueryExecutor;
pub use inspector::SchemaInspector;
pub use provider::ConnectionProvider;
