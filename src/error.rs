//! Error types for command submission.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures a `/boinc2docker` request can end in.
///
/// The `Display` text is what the client sees as the plain-text body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or empty command, undecodable body, or malformed quoting.
    #[error("{0}")]
    Validation(String),

    /// The stdout log file could not be created.
    #[error("{0}")]
    Resource(#[from] std::io::Error),

    /// The subprocess failed to start or did not exit successfully.
    #[error("{0}")]
    Execution(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Resource(_) | ApiError::Execution(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Validation(message) => tracing::warn!("Rejected command: {}", message),
            ApiError::Resource(e) => tracing::error!("Failed to create stdout log: {}", e),
            ApiError::Execution(message) => tracing::error!("Command failed: {}", message),
        }
        (status, self.to_string()).into_response()
    }
}
