//! Fixed-window rate limiting keyed by client address.

use crate::models::ErrorBody;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::warn;

#[derive(Debug)]
struct WindowSlot {
    started: Instant,
    count: u32,
}

/// Per-client request counter over a fixed window.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    slots: Mutex<HashMap<IpAddr, WindowSlot>>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Record one request for `key` and report whether it is allowed.
    pub fn allow(&self, key: IpAddr) -> bool {
        let now = Instant::now();
        let mut slots = self.slots.lock().expect("rate limiter lock poisoned");

        let slot = slots.entry(key).or_insert(WindowSlot {
            started: now,
            count: 0,
        });
        if now.duration_since(slot.started) >= self.window {
            slot.started = now;
            slot.count = 0;
        }
        slot.count += 1;
        slot.count <= self.max_requests
    }
}

/// Rate limiting middleware for the API routes.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    // Connect info is absent in router-level tests; fall back to one shared
    // bucket rather than rejecting the request.
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if limiter.allow(client) {
        next.run(request).await
    } else {
        warn!(client = %client, "Rate limit exceeded");
        (
            StatusCode::TOO_MANY_REQUESTS,
            axum::Json(ErrorBody::new(
                "Too many requests",
                Some("Please try again later".to_string()),
            )),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT_A: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    const CLIENT_B: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

    #[test]
    fn test_allows_up_to_max() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 3);
        assert!(limiter.allow(CLIENT_A));
        assert!(limiter.allow(CLIENT_A));
        assert!(limiter.allow(CLIENT_A));
        assert!(!limiter.allow(CLIENT_A));
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 1);
        assert!(limiter.allow(CLIENT_A));
        assert!(!limiter.allow(CLIENT_A));
        assert!(limiter.allow(CLIENT_B));
    }

    #[test]
    fn test_window_resets() {
        let limiter = RateLimiter::new(Duration::from_millis(0), 1);
        assert!(limiter.allow(CLIENT_A));
        // Zero-length window: every request starts a fresh slot
        assert!(limiter.allow(CLIENT_A));
    }
}
