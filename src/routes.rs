//! HTTP handlers.
//!
//! Thin translation between the HTTP surface and the gateway operations:
//! extract parameters, call the operation, wrap the outcome in its
//! envelope. All policy (validation, classification, pagination, error
//! mapping) lives in the gateway.

use crate::gateway::pagination::{DEFAULT_ROWS_LIMIT, DEFAULT_TABLES_LIMIT, PageParams};
use crate::models::{
    ErrorBody, ExecuteBody, HealthBody, QueryBody, RowBody, SchemaBody, ServiceBanner,
    StatementBody, TableDataBody, TableInfoBody, TableListBody,
};
use crate::server::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;

/// `GET /`
pub(crate) async fn service_banner() -> Json<ServiceBanner> {
    Json(ServiceBanner {
        success: true,
        service: "PostgreSQL Database Gateway",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

/// Fallback for unknown routes.
pub(crate) async fn not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new(
            "Not found",
            Some(format!("Route {uri} not found")),
        )),
    )
        .into_response()
}

/// `GET /api/db/health`
pub(crate) async fn health(State(state): State<AppState>) -> Response {
    let healthy = state.gateway.health().await.is_healthy();
    let body = HealthBody {
        success: healthy,
        status: if healthy { "healthy" } else { "unhealthy" },
        database: if healthy { "connected" } else { "disconnected" },
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body)).into_response()
}

/// `GET /api/db/tables?page&limit`
pub(crate) async fn list_tables(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Response {
    let limit = params.limit.unwrap_or(DEFAULT_TABLES_LIMIT);
    match state.gateway.list_tables(params.page, limit).await {
        Ok(list) => Json(TableListBody {
            success: true,
            data: list.entries,
            pagination: list.pagination,
        })
        .into_response(),
        Err(e) => state.error_response(e),
    }
}

/// `GET /api/db/table/{name}/info`
pub(crate) async fn table_info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    match state.gateway.table_info(&name).await {
        Ok(details) => Json(TableInfoBody {
            success: true,
            table: name,
            total_rows: details.total_rows,
            field_count: details.fields.len(),
            fields: details.fields,
        })
        .into_response(),
        Err(e) => state.error_response(e),
    }
}

/// `GET /api/db/table/{name}/data?page&limit`
pub(crate) async fn table_data(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<PageParams>,
) -> Response {
    let limit = params.limit.unwrap_or(DEFAULT_ROWS_LIMIT);
    match state.gateway.table_data(&name, params.page, limit).await {
        Ok(data) => Json(TableDataBody {
            success: true,
            table: name,
            data: data.rows,
            pagination: data.pagination,
        })
        .into_response(),
        Err(e) => state.error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RowParams {
    id: Option<String>,
    #[serde(default = "default_row_field")]
    field: String,
}

fn default_row_field() -> String {
    "id".to_string()
}

/// `GET /api/db/table/{name}/row?id&field`
pub(crate) async fn table_row(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<RowParams>,
) -> Response {
    match state
        .gateway
        .table_row(&name, &params.field, params.id.as_deref())
        .await
    {
        Ok(row) => Json(RowBody {
            success: true,
            table: name,
            data: row,
        })
        .into_response(),
        Err(e) => state.error_response(e),
    }
}

/// `GET /api/db/schema/{name}`
pub(crate) async fn table_schema(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    match state.gateway.table_schema(&name).await {
        Ok(columns) => Json(SchemaBody {
            success: true,
            table: name,
            data: columns,
        })
        .into_response(),
        Err(e) => state.error_response(e),
    }
}

/// `POST /api/db/query`
pub(crate) async fn run_query(
    State(state): State<AppState>,
    Json(body): Json<StatementBody>,
) -> Response {
    match state.gateway.run_query(&body.query, &body.params).await {
        Ok(result) => Json(QueryBody {
            success: true,
            row_count: result.row_count(),
            data: result.rows,
            fields: result.columns,
            truncated: result.truncated,
        })
        .into_response(),
        Err(e) => state.error_response(e),
    }
}

/// `POST /api/db/execute`
pub(crate) async fn execute(
    State(state): State<AppState>,
    Json(body): Json<StatementBody>,
) -> Response {
    match state.gateway.execute(&body.query, &body.params).await {
        Ok(execution) => Json(ExecuteBody {
            success: true,
            command: execution.command.to_string(),
            row_count: execution.outcome.rows.len(),
            data: execution.outcome.rows,
            rows_affected: execution.outcome.rows_affected,
            truncated: execution.outcome.truncated,
        })
        .into_response(),
        Err(e) => state.error_response(e),
    }
}
