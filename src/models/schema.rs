//! Catalog data models.
//!
//! Types decoded from `information_schema` lookups. Field names match the
//! catalog column names so they serialize exactly as the database reports
//! them.

use serde::Serialize;
use sqlx::FromRow;

/// One entry in the table listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TableEntry {
    /// Table name from the schema catalog.
    pub table_name: String,
    /// "BASE TABLE" or "VIEW".
    pub table_type: String,
}

/// Column metadata for a single table, ordered by ordinal position.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ColumnInfo {
    pub column_name: String,
    pub data_type: String,
    pub character_maximum_length: Option<i32>,
    /// "YES" or "NO", as reported by the catalog.
    pub is_nullable: String,
    pub column_default: Option<String>,
}
