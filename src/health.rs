use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    posts: usize,
    content: String,
    assets: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse),
        (status = 503, description = "Service unavailable")
    )
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let layout = state.config.layout();
    let content = directory_health(&layout.content_dir).await;
    let assets = directory_health(&layout.public_dir).await;

    if content == "unwritable" || assets == "unwritable" {
        error!(%content, %assets, "health check failed");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let posts = state.store.posts().await.len();
    info!(posts, "Health check passed");
    Ok(Json(HealthResponse {
        status: "OK".to_string(),
        posts,
        content: content.to_string(),
        assets: assets.to_string(),
    }))
}

/// A directory that does not exist yet is fine: the first post creates it.
async fn directory_health(dir: &std::path::Path) -> &'static str {
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() && !meta.permissions().readonly() => "healthy",
        Ok(_) => "unwritable",
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => "missing",
        Err(_) => "unwritable",
    }
}
