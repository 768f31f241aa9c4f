//! Permanent redirect from the bare domain to the `www.` host.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::app_state::AppState;

const EXEMPT_PREFIXES: [&str; 2] = ["/api/", "/assets/"];
const EXEMPT_PATHS: [&str; 2] = ["/favicon.ico", "/healthz"];

/// Where `host` + `path_and_query` should be redirected, if anywhere.
pub fn redirect_target(host: &str, path_and_query: &str) -> Option<String> {
    let path = path_and_query.split('?').next().unwrap_or_default();
    if EXEMPT_PREFIXES.iter().any(|p| path.starts_with(p)) || EXEMPT_PATHS.contains(&path) {
        return None;
    }

    let hostname = strip_port(host).to_ascii_lowercase();
    if hostname.is_empty() || hostname == "localhost" || hostname.starts_with("www.") {
        return None;
    }
    Some(format!("https://www.{hostname}{path_and_query}"))
}

fn strip_port(host: &str) -> &str {
    // bracketed IPv6 literals keep their colons
    if host.starts_with('[') {
        return host.split_once(']').map(|(h, _)| &host[..=h.len()]).unwrap_or(host);
    }
    host.split(':').next().unwrap_or(host)
}

pub async fn canonical_host_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    if !state.config.canonical_redirect() {
        return next.run(req).await;
    }

    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| req.uri().host())
        .unwrap_or_default();
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    match redirect_target(host, path_and_query) {
        Some(location) => match HeaderValue::from_str(&location) {
            Ok(value) => {
                debug!(%location, "redirecting to canonical host");
                (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, value)]).into_response()
            }
            Err(_) => next.run(req).await,
        },
        None => next.run(req).await,
    }
}
