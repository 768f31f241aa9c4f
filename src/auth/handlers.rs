use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, warn};

use crate::{
    app_state::AppState,
    auth::dtos::{LoginRequest, LoginResponse},
    dtos::ErrorResponse,
    passwords::PasswordError,
};

#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Admin token issued", body = LoginResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 503, description = "Admin login not configured", body = ErrorResponse)
    )
)]
pub async fn login(State(state): State<AppState>, Json(payload): Json<LoginRequest>) -> Response {
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(error))).into_response();
    }

    let admin = state.admin.clone();
    let username = payload.username.clone();
    let checked =
        tokio::task::spawn_blocking(move || admin.check(&payload.username, &payload.password))
            .await;

    match checked {
        Ok(Ok(true)) => {}
        Ok(Ok(false)) => {
            warn!(%username, "admin login rejected");
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Invalid credentials")),
            )
                .into_response();
        }
        Ok(Err(PasswordError::NotConfigured)) => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new("Admin login is not configured")),
            )
                .into_response();
        }
        Ok(Err(e)) => {
            error!(error = %e, "admin password verification failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Password verification failed")),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "password verification task panicked");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Password verification failed")),
            )
                .into_response();
        }
    }

    match state.jwt.issue_admin_token(&username) {
        Ok(token) => {
            info!(%username, "admin token issued");
            (StatusCode::OK, Json(LoginResponse { token })).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to sign admin token");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to generate token")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app_state::test_support::test_state_with, config::Config, passwords::Passwords};
    use axum::{Router, body::Body, http::Request, routing::post};
    use serde_json::json;
    use tower::ServiceExt;

    async fn app(hash: Option<String>) -> (Router, tempfile::TempDir) {
        let (state, dir) = test_state_with(|config: Config| match hash {
            Some(h) => config.with_admin_password_hash(h),
            None => config,
        })
        .await;
        let router = Router::new()
            .route("/api/admin/login", post(login))
            .with_state(state);
        (router, dir)
    }

    fn login_request(username: &str, password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/admin/login")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "username": username, "password": password }).to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_success_returns_token() {
        let hash = Passwords::default().hash("correct horse battery").unwrap();
        let (app, _dir) = app(Some(hash)).await;

        let response = app
            .oneshot(login_request("admin", "correct horse battery"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let login: LoginResponse = serde_json::from_slice(&body).unwrap();
        assert!(!login.token.is_empty());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let hash = Passwords::default().hash("correct horse battery").unwrap();
        let (app, _dir) = app(Some(hash)).await;

        let response = app
            .oneshot(login_request("admin", "incorrect horse"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_not_configured() {
        let (app, _dir) = app(None).await;
        let response = app
            .oneshot(login_request("admin", "anything at all"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_login_blank_username() {
        let (app, _dir) = app(None).await;
        let response = app.oneshot(login_request("", "pw")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
