//! Schema catalog access.
//!
//! Lookups against `information_schema` for the table listing, table info,
//! and schema endpoints, plus the table-scoped row fetches. Table and field
//! names are interpolated into SQL text here, so every function taking an
//! identifier requires it to have passed the allowlist check first.
//!
//! The catalog columns are cast to concrete types in SQL because
//! `information_schema` exposes domain types (`cardinal_number`,
//! `yes_or_no`) the driver cannot decode directly.

use crate::db::rows::RowToJson;
use crate::models::{ColumnInfo, TableEntry};
use serde_json::Value as JsonValue;
use sqlx::PgPool;

mod queries {
    pub const COUNT_TABLES: &str = r#"
        SELECT COUNT(*)
        FROM information_schema.tables
        WHERE table_schema = 'public'
    "#;

    pub const LIST_TABLES: &str = r#"
        SELECT
            table_name::text AS table_name,
            table_type::text AS table_type
        FROM information_schema.tables
        WHERE table_schema = 'public'
        ORDER BY table_name
        LIMIT $1 OFFSET $2
    "#;

    pub const TABLE_COLUMNS: &str = r#"
        SELECT
            column_name::text AS column_name,
            data_type::text AS data_type,
            character_maximum_length::int4 AS character_maximum_length,
            is_nullable::text AS is_nullable,
            column_default::text AS column_default
        FROM information_schema.columns
        WHERE table_schema = 'public' AND table_name = $1
        ORDER BY ordinal_position
    "#;
}

/// Catalog reader for the public schema.
pub struct Catalog;

impl Catalog {
    /// Count the tables visible in the public schema.
    pub async fn count_tables(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(queries::COUNT_TABLES)
            .fetch_one(pool)
            .await
    }

    /// Fetch one page of the table listing, ordered by name.
    pub async fn list_tables(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TableEntry>, sqlx::Error> {
        sqlx::query_as(queries::LIST_TABLES)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Column metadata for a table, ordered by ordinal position.
    pub async fn table_columns(
        pool: &PgPool,
        table: &str,
    ) -> Result<Vec<ColumnInfo>, sqlx::Error> {
        sqlx::query_as(queries::TABLE_COLUMNS)
            .bind(table)
            .fetch_all(pool)
            .await
    }

    /// Count the rows of a table. `table` must be a validated identifier.
    pub async fn count_rows(pool: &PgPool, table: &str) -> Result<i64, sqlx::Error> {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        sqlx::query_scalar(&sql).fetch_one(pool).await
    }

    /// Fetch one page of a full-row dump. `table` must be a validated
    /// identifier.
    pub async fn fetch_page(
        pool: &PgPool,
        table: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<serde_json::Map<String, JsonValue>>, sqlx::Error> {
        let sql = format!("SELECT * FROM {table} LIMIT $1 OFFSET $2");
        let rows = sqlx::query(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        Ok(rows.iter().map(|r| r.to_json_map()).collect())
    }

    /// Fetch a single row where `field` equals `value`, comparing the
    /// column's textual form so integer, uuid, and text keys all match their
    /// printed value. `table` and `field` must be validated identifiers.
    pub async fn fetch_row(
        pool: &PgPool,
        table: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<serde_json::Map<String, JsonValue>>, sqlx::Error> {
        let sql = format!("SELECT * FROM {table} WHERE {field}::text = $1 LIMIT 1");
        let row = sqlx::query(&sql).bind(value).fetch_optional(pool).await?;
        Ok(row.map(|r| r.to_json_map()))
    }
}
