//! HTTP API handlers
//!
//! One module per concern, combined into a router by `build_router` in
//! the crate root.

pub mod analyze;
pub mod beacons;
pub mod facilities;
pub mod health;
pub mod reports;
pub mod score;
pub mod sse;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// HTTP-facing wrapper around the common error enum
///
/// Handlers return `Result<Json<T>, ApiError>`; the `?` operator lifts
/// core errors into JSON error responses.
#[derive(Debug)]
pub struct ApiError(pub glimpse_common::Error);

impl From<glimpse_common::Error> for ApiError {
    fn from(e: glimpse_common::Error) -> Self {
        ApiError(e)
    }
}

impl From<crate::inference::VisionError> for ApiError {
    fn from(e: crate::inference::VisionError) -> Self {
        ApiError(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use glimpse_common::Error;

        let status = match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::EmptyInput(_) | Error::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::InferenceUnavailable(_) => StatusCode::BAD_GATEWAY,
            Error::Config(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!("API error: {}", self.0);
        }

        let body = Json(json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
