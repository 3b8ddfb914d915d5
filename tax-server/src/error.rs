//! JSON error envelope shared by every endpoint.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tax_advisor::{AdvisoryError, CompletionError};
use tax_core::ValidationError;
use thiserror::Error;
use tracing::{error, warn};

/// Failures a handler reports to the caller as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself was wrong; answered with 400.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The completion service failed; answered with 500.
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Completion(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AdvisoryError> for ApiError {
    fn from(err: AdvisoryError) -> Self {
        match err {
            AdvisoryError::Validation(e) => Self::Validation(e),
            AdvisoryError::Completion(e) => Self::Completion(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        match &self {
            Self::Validation(_) => warn!(error = %message, "rejected request"),
            Self::Completion(_) => error!(error = %message, "completion service failed"),
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
