use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::{error, info, instrument, warn};

use crate::{
    app_state::AppState,
    dtos::ErrorResponse,
    enquiry::{
        compose::compose,
        dtos::{EnquiryRequest, EnquiryResponse},
    },
};

#[utoipa::path(
    post,
    path = "/api/send-enquiry",
    tag = "enquiry",
    request_body = EnquiryRequest,
    responses(
        (status = 200, description = "Enquiry relayed", body = EnquiryResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 429, description = "Too many enquiries from this address", body = ErrorResponse),
        (status = 500, description = "Mail relay failed", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn send_enquiry(
    State(state): State<AppState>,
    Json(payload): Json<EnquiryRequest>,
) -> Response {
    if let Err(reason) = payload.validate() {
        warn!(reason, "enquiry rejected");
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(reason))).into_response();
    }

    let email = compose(
        &payload,
        &state.config.smtp().recipient,
        state.config.site_name(),
        Utc::now(),
    );

    match state.mailer.send(email).await {
        Ok(()) => {
            info!("enquiry sent");
            (
                StatusCode::OK,
                Json(EnquiryResponse {
                    success: true,
                    message: "Enquiry sent successfully".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to send enquiry email");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details(
                    "Failed to send enquiry",
                    e.to_string(),
                )),
            )
                .into_response()
        }
    }
}
