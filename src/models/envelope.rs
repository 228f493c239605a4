//! Response envelopes.
//!
//! Every HTTP operation answers with one of these shapes. Success envelopes
//! never carry an `error` field and error envelopes never carry row data;
//! the types make that invariant structural.

use crate::gateway::pagination::Pagination;
use crate::models::query::ColumnMetadata;
use crate::models::schema::{ColumnInfo, TableEntry};
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Uniform error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    /// Short caller-facing label, e.g. "Invalid table name".
    pub error: String,
    /// Detail message, present only in development deployments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: Option<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message,
        }
    }
}

/// Banner served at the root path.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceBanner {
    pub success: bool,
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

/// `GET /api/db/health` payload, HTTP 200 or 503.
#[derive(Debug, Clone, Serialize)]
pub struct HealthBody {
    pub success: bool,
    /// "healthy" or "unhealthy"
    pub status: &'static str,
    /// "connected" or "disconnected"
    pub database: &'static str,
    /// RFC3339 timestamp of the check.
    pub timestamp: String,
}

/// `GET /api/db/tables` payload.
#[derive(Debug, Clone, Serialize)]
pub struct TableListBody {
    pub success: bool,
    pub data: Vec<TableEntry>,
    pub pagination: Pagination,
}

/// `GET /api/db/table/{name}/info` payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInfoBody {
    pub success: bool,
    pub table: String,
    pub total_rows: i64,
    pub fields: Vec<ColumnInfo>,
    pub field_count: usize,
}

/// `GET /api/db/table/{name}/data` payload.
#[derive(Debug, Clone, Serialize)]
pub struct TableDataBody {
    pub success: bool,
    pub table: String,
    pub data: Vec<serde_json::Map<String, JsonValue>>,
    pub pagination: Pagination,
}

/// `GET /api/db/table/{name}/row` payload.
#[derive(Debug, Clone, Serialize)]
pub struct RowBody {
    pub success: bool,
    pub table: String,
    pub data: serde_json::Map<String, JsonValue>,
}

/// `GET /api/db/schema/{name}` payload.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaBody {
    pub success: bool,
    pub table: String,
    pub data: Vec<ColumnInfo>,
}

/// `POST /api/db/query` payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryBody {
    pub success: bool,
    pub data: Vec<serde_json::Map<String, JsonValue>>,
    pub row_count: usize,
    pub fields: Vec<ColumnMetadata>,
    pub truncated: bool,
}

/// `POST /api/db/execute` payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteBody {
    pub success: bool,
    /// Statement kind that ran, e.g. "SELECT" or "UPDATE".
    pub command: String,
    pub data: Vec<serde_json::Map<String, JsonValue>>,
    pub row_count: usize,
    pub rows_affected: u64,
    pub truncated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::pagination::paginate;

    #[test]
    fn test_error_body_omits_message_when_none() {
        let body = ErrorBody::new("Invalid table name", None);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Invalid table name");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_pagination_fields_are_camel_case() {
        let body = TableListBody {
            success: true,
            data: Vec::new(),
            pagination: paginate(2, 10, 25),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["pagination"]["totalPages"], 3);
        assert_eq!(json["pagination"]["hasNext"], true);
        assert_eq!(json["pagination"]["hasPrev"], true);
    }

    #[test]
    fn test_info_body_fields_are_camel_case() {
        let body = TableInfoBody {
            success: true,
            table: "users".to_string(),
            total_rows: 3,
            fields: Vec::new(),
            field_count: 0,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["totalRows"], 3);
        assert_eq!(json["fieldCount"], 0);
    }
}
