use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};
use tracing::warn;

use crate::dtos::ErrorResponse;

/// Expired windows are dropped once every this many requests.
const SWEEP_EVERY: u64 = 256;

/// Fixed-window request counter keyed by client IP.
#[derive(Clone)]
pub struct RateLimit {
    store: Arc<DashMap<String, RateLimitData>>,
    calls: Arc<AtomicU64>,
    max_requests: u32,
    window_seconds: i64,
}

#[derive(Debug, Clone)]
struct RateLimitData {
    count: u32,
    window_start: DateTime<Utc>,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_seconds: i64) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            calls: Arc::new(AtomicU64::new(0)),
            max_requests,
            window_seconds,
        }
    }

    /// Count one request for `key`; `false` once the window's budget is spent.
    fn allow(&self, key: String, now: DateTime<Utc>) -> bool {
        // must run before `entry` takes a shard lock
        if self.calls.fetch_add(1, Ordering::Relaxed) % SWEEP_EVERY == SWEEP_EVERY - 1 {
            self.evict_expired(now);
        }

        let mut entry = self.store.entry(key).or_insert_with(|| RateLimitData {
            count: 0,
            window_start: now,
        });
        let data = entry.value_mut();

        if now.signed_duration_since(data.window_start) >= Duration::seconds(self.window_seconds) {
            data.count = 0;
            data.window_start = now;
        }

        data.count += 1;
        data.count <= self.max_requests
    }

    fn evict_expired(&self, now: DateTime<Utc>) {
        let window = Duration::seconds(self.window_seconds);
        self.store
            .retain(|_, data| now.signed_duration_since(data.window_start) < window);
    }
}

/// Peer address when the server was started with connect info, else the
/// first `X-Forwarded-For` hop.
fn client_key(req: &Request) -> String {
    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }
    req.headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// IP-based rate limiting middleware.
pub async fn rate_limit_middleware(
    State(rate_limit): State<RateLimit>,
    req: Request,
    next: Next,
) -> Response {
    let key = client_key(&req);

    if !rate_limit.allow(key.clone(), Utc::now()) {
        warn!(client = %key, path = %req.uri().path(), "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse::new("Rate limit exceeded")),
        )
            .into_response();
    }

    next.run(req).await
}
