//! Error responses for the HTTP API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use super::fetch::FetchError;

/// Errors surfaced to API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request carried no usable `url`.
    #[error("URL is required")]
    MissingUrl,

    /// The upstream page could not be retrieved.
    #[error("Failed to fetch content")]
    Fetch(#[from] FetchError),

    /// The rewrite task did not complete.
    #[error("Failed to transform content")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingUrl => StatusCode::BAD_REQUEST,
            Self::Fetch(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::MissingUrl => warn!("rejected request without url"),
            Self::Fetch(source) => error!(%source, "upstream fetch failed"),
            Self::Internal(detail) => error!(%detail, "transform task failed"),
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
