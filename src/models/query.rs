//! Query-related data models.
//!
//! This module defines types for SQL statement requests and results.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A parameter value for parameterized queries.
///
/// Values always travel as bind parameters; they are never interpolated
/// into SQL text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryParam {
    /// NULL value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (stored as i64 for maximum range)
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Arrays and objects, bound as JSON
    Json(JsonValue),
}

impl QueryParam {
    /// Check if this parameter is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the type name of this parameter for debugging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Json(_) => "json",
        }
    }
}

/// Request body accepted by the `/query` and `/execute` endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct StatementBody {
    /// SQL text supplied by the caller.
    pub query: String,
    /// Positional bind parameters ($1, $2, ...).
    #[serde(default)]
    pub params: Vec<QueryParam>,
}

/// Per-column descriptor attached to query results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub name: String,
    /// Database-specific type (e.g., "int8", "varchar", "text")
    pub type_name: String,
    pub nullable: bool,
}

impl ColumnMetadata {
    /// Create new column metadata.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            nullable,
        }
    }
}

/// Result of a read-only query execution.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub columns: Vec<ColumnMetadata>,
    pub rows: Vec<serde_json::Map<String, JsonValue>>,
    pub truncated: bool,
    pub execution_time_ms: u64,
}

impl QueryResult {
    /// Get the number of rows in the result.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Result of an unrestricted statement execution.
#[derive(Debug, Clone, Serialize)]
pub struct RawOutcome {
    pub columns: Vec<ColumnMetadata>,
    pub rows: Vec<serde_json::Map<String, JsonValue>>,
    pub rows_affected: u64,
    pub truncated: bool,
    pub execution_time_ms: u64,
}
