//! Database access layer.
//!
//! - Connection pool management
//! - Statement execution with bind parameters
//! - Schema catalog lookups
//! - Row-to-JSON decoding

pub mod catalog;
pub mod executor;
pub mod pool;
pub mod rows;

pub use catalog::Catalog;
pub use executor::QueryExecutor;
pub use pool::{PoolHealth, PoolManager};
pub use rows::RowToJson;
