//! API key authentication for the database routes.

use crate::models::ErrorBody;
use axum::{
    extract::{Request, State},
    http::{HeaderName, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::warn;

pub static API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// API key configuration for the gateway.
#[derive(Debug, Clone)]
pub struct ApiKeyConfig {
    enabled: bool,
    keys: Vec<String>,
}

impl ApiKeyConfig {
    /// Build from the configured key list. With no keys, validation is
    /// skipped entirely (the original deployment behavior).
    pub fn from_keys(keys: Vec<String>) -> Self {
        let keys: Vec<String> = keys
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        let enabled = !keys.is_empty();
        Self { enabled, keys }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            keys: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }
}

impl Default for ApiKeyConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Authentication middleware applied ahead of every database route.
pub async fn api_key_middleware(
    State(config): State<Arc<ApiKeyConfig>>,
    request: Request,
    next: Next,
) -> Response {
    if !config.enabled {
        return next.run(request).await;
    }

    let provided = match request.headers().get(&API_KEY_HEADER) {
        Some(value) => match value.to_str() {
            Ok(s) => s,
            Err(_) => {
                warn!("Request with malformed API key header");
                return rejection(
                    StatusCode::FORBIDDEN,
                    "Invalid API key",
                    "The provided API key is not valid",
                );
            }
        },
        None => {
            warn!("Request without API key");
            return rejection(
                StatusCode::UNAUTHORIZED,
                "API key required",
                "Please provide X-API-Key header",
            );
        }
    };

    if verify_key(&config, provided) {
        next.run(request).await
    } else {
        warn!(key_prefix = %mask_key(provided), "Invalid API key attempt");
        rejection(
            StatusCode::FORBIDDEN,
            "Invalid API key",
            "The provided API key is not valid",
        )
    }
}

fn verify_key(config: &ApiKeyConfig, provided: &str) -> bool {
    let mut found = false;
    for expected in &config.keys {
        if constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
            found = true;
        }
    }
    found
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

fn mask_key(key: &str) -> String {
    if key.len() <= 8 {
        "***".to_string()
    } else {
        format!("{}...", &key[..8])
    }
}

fn rejection(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        axum::Json(ErrorBody::new(error, Some(message.to_string()))),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_keys() {
        let config = ApiKeyConfig::from_keys(Vec::new());
        assert!(!config.is_enabled());

        let config = ApiKeyConfig::from_keys(vec!["  ".to_string(), String::new()]);
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_enabled_with_keys() {
        let config = ApiKeyConfig::from_keys(vec!["alpha".to_string(), " beta ".to_string()]);
        assert!(config.is_enabled());
        assert_eq!(config.key_count(), 2);
        assert!(verify_key(&config, "alpha"));
        assert!(verify_key(&config, "beta"));
        assert!(!verify_key(&config, "gamma"));
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("short"), "***");
        assert_eq!(mask_key("0123456789abcdef"), "01234567...");
    }
}
