use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::io;
use thiserror::Error;
use tracing::{error, warn};

use crate::{blog::store::StoreError, dtos::ErrorResponse, extractor::ExtractError};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("slug '{0}' must be lowercase letters, digits and single hyphens")]
    InvalidSlug(String),

    #[error("a post with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("malformed multipart body: {message}")]
    Multipart { status: StatusCode, message: String },

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Store(StoreError),

    /// I/O while staging or publishing. Names the artifact, never the path.
    #[error("failed to {action} {artifact}: {source}")]
    Artifact {
        action: &'static str,
        artifact: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("staged {0} did not verify")]
    Verification(&'static str),
}

impl From<StoreError> for IngestError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateSlug(slug) => Self::DuplicateSlug(slug),
            other => Self::Store(other),
        }
    }
}

impl IngestError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::InvalidSlug(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateSlug(_) => StatusCode::CONFLICT,
            Self::Multipart { status, .. } => *status,
            Self::Extract(ExtractError::UnsupportedFormat(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            Self::Extract(ExtractError::Empty) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = if status.is_server_error() {
            error!(error = %self, "blog ingestion failed");
            ErrorResponse::with_details("Failed to create blog post", self.to_string())
        } else {
            warn!(error = %self, %status, "blog submission rejected");
            ErrorResponse::new(self.to_string())
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(IngestError::MissingFields.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            IngestError::from(StoreError::DuplicateSlug("a".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            IngestError::from(ExtractError::UnsupportedFormat("a.pptx".into())).status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            IngestError::from(ExtractError::Empty).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            IngestError::from(ExtractError::Pdf("bad xref".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_artifact_error_has_no_path() {
        let err = IngestError::Artifact {
            action: "write",
            artifact: "card image",
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to write card image: denied");
    }
}
