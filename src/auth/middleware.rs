use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{app_state::AppState, dtos::ErrorResponse};

/// Extractor that admits only requests carrying a valid admin bearer token.
/// Rejects everything while no admin password is configured, whatever the
/// token says.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub username: String,
}

impl FromRequestParts<AppState> for AuthenticatedAdmin {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !state.admin.is_configured() {
            return Err(AuthError::NotConfigured);
        }

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::InvalidTokenFormat)?;

        let claims = state.jwt.verify_admin_token(token).map_err(|e| {
            warn!(error = %e, "rejected admin token");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedAdmin {
            username: claims.sub,
        })
    }
}

#[derive(Debug)]
pub enum AuthError {
    NotConfigured,
    MissingToken,
    InvalidTokenFormat,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::NotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Admin login is not configured",
            ),
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authorization token"),
            AuthError::InvalidTokenFormat => (StatusCode::UNAUTHORIZED, "Invalid token format"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
