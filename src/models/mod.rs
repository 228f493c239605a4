//! Data models for the gateway.
//!
//! This module re-exports all wire types used throughout the application.

pub mod envelope;
pub mod query;
pub mod schema;

// Re-export commonly used types
pub use envelope::{
    ErrorBody, ExecuteBody, HealthBody, QueryBody, RowBody, SchemaBody, ServiceBanner,
    TableDataBody, TableInfoBody, TableListBody,
};
pub use query::{ColumnMetadata, QueryParam, QueryResult, RawOutcome, StatementBody};
pub use schema::{ColumnInfo, TableEntry};
