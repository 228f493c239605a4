//! PostgreSQL HTTP Gateway Library
//!
//! This library exposes a constrained read surface over a PostgreSQL
//! database: table listing, schema inspection, paginated row access, and
//! caller-supplied read-only queries, all behind one shared connection
//! pool.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod limit;
pub mod models;
pub mod routes;
pub mod server;

pub use config::Config;
pub use error::GatewayError;
pub use gateway::QueryGateway;
