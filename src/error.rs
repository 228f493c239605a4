//! Error types for the gateway.
//!
//! This module defines all error types using `thiserror`. Validation errors
//! are raised before any database round-trip; execution errors are caught at
//! the point of the database call, logged with full detail, and surfaced to
//! the caller as an envelope whose detail is redacted outside development
//! deployments.

use crate::models::ErrorBody;
use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// A table/column/field name failed the allowlist check.
    #[error("Invalid {subject}")]
    InvalidIdentifier { subject: &'static str },

    /// A required request parameter was absent.
    #[error("{name} parameter is required")]
    MissingParameter { name: &'static str },

    /// The statement class is not permitted on this endpoint.
    #[error("{reason}")]
    Forbidden { reason: String },

    /// Zero rows for a single-row lookup.
    #[error("Data not found")]
    NotFound,

    /// The pool could not supply a working connection.
    #[error("Database unavailable: {message}")]
    PoolUnavailable { message: String },

    /// The database rejected or failed the statement.
    #[error("{context}: {message}")]
    QueryExecution {
        /// Caller-facing operation label, e.g. "Failed to fetch tables".
        context: String,
        message: String,
        /// e.g. "42P01" for undefined table
        sql_state: Option<String>,
    },

    /// Invalid startup configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl GatewayError {
    /// Create an invalid identifier error; `subject` names what was checked.
    pub fn invalid_identifier(subject: &'static str) -> Self {
        Self::InvalidIdentifier { subject }
    }

    /// Create a missing parameter error.
    pub fn missing_parameter(name: &'static str) -> Self {
        Self::MissingParameter { name }
    }

    /// Create a forbidden error.
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    /// Create a pool unavailability error.
    pub fn pool_unavailable(message: impl Into<String>) -> Self {
        Self::PoolUnavailable {
            message: message.into(),
        }
    }

    /// Create a query execution error.
    pub fn query_execution(
        context: impl Into<String>,
        message: impl Into<String>,
        sql_state: Option<String>,
    ) -> Self {
        Self::QueryExecution {
            context: context.into(),
            message: message.into(),
            sql_state,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Replace the operation label on execution errors; other variants pass
    /// through unchanged.
    pub fn with_context(self, context: &str) -> Self {
        match self {
            Self::QueryExecution {
                message, sql_state, ..
            } => Self::QueryExecution {
                context: context.to_string(),
                message,
                sql_state,
            },
            other => other,
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidIdentifier { .. } | Self::MissingParameter { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PoolUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::QueryExecution { .. } | Self::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Build the caller-facing envelope. Detail is attached only when
    /// `expose_detail` is set (development mode); 4xx variants have nothing
    /// to hide and carry no separate detail.
    pub fn to_envelope(&self, expose_detail: bool) -> ErrorBody {
        match self {
            Self::QueryExecution {
                context,
                message,
                sql_state,
            } => {
                let detail = expose_detail.then(|| match sql_state {
                    Some(code) => format!("{message} (SQLSTATE: {code})"),
                    None => message.clone(),
                });
                ErrorBody::new(context.clone(), detail)
            }
            Self::PoolUnavailable { message } => ErrorBody::new(
                "Database unavailable",
                expose_detail.then(|| message.clone()),
            ),
            other => ErrorBody::new(other.to_string(), None),
        }
    }
}

/// Convert sqlx errors to GatewayError.
///
/// Connectivity-class failures become `PoolUnavailable`; everything the
/// database itself reported becomes a `QueryExecution` error with a generic
/// label that callers refine via [`GatewayError::with_context`].
impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                GatewayError::pool_unavailable("timed out acquiring a connection from the pool")
            }
            sqlx::Error::PoolClosed => GatewayError::pool_unavailable("connection pool is closed"),
            sqlx::Error::Io(io_err) => {
                GatewayError::pool_unavailable(format!("I/O error: {io_err}"))
            }
            sqlx::Error::Tls(tls_err) => {
                GatewayError::pool_unavailable(format!("TLS error: {tls_err}"))
            }
            sqlx::Error::Protocol(msg) => {
                GatewayError::pool_unavailable(format!("protocol error: {msg}"))
            }
            sqlx::Error::Configuration(msg) => GatewayError::config(msg.to_string()),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                GatewayError::query_execution("Query failed", db_err.message(), code)
            }
            sqlx::Error::RowNotFound => GatewayError::NotFound,
            other => GatewayError::query_execution("Query failed", other.to_string(), None),
        }
    }
}

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
