//! HTTP error envelope

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::MeetingMindError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Not enough history to run the task (400, reported as `message`)
    #[error("{0}")]
    InsufficientInput(&'static str),

    /// Body is not valid JSON for the route (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Body could not be read, e.g. over the size limit (413)
    #[error("Invalid request: {}", .0.body_text())]
    Body(#[from] BytesRejection),

    /// Model call or reply parsing failed (500)
    #[error(transparent)]
    Analysis(MeetingMindError),
}

impl From<MeetingMindError> for ApiError {
    fn from(err: MeetingMindError) -> Self {
        match err {
            MeetingMindError::InsufficientHistory { .. } => {
                ApiError::InsufficientInput(super::handlers::INSUFFICIENT_HISTORY_MESSAGE)
            }
            other => ApiError::Analysis(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::InsufficientInput(message) => {
                warn!("Rejected request: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "success": false, "message": message }),
                )
            }
            ApiError::BadRequest(message) => {
                warn!("Rejected request: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "success": false, "error": self.to_string() }),
                )
            }
            ApiError::Body(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                (
                    rejection.status(),
                    json!({ "success": false, "error": self.to_string() }),
                )
            }
            ApiError::Analysis(err) => {
                error!(error = ?err, "Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": err.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
