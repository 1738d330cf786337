//! Request-level errors for the HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors rejected before the schema reaches the generator.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Amount must be between 1 and {max}")]
    AmountOutOfRange { max: usize },

    #[error("Schema is required")]
    MissingSchema,

    #[error("Invalid JSON schema")]
    InvalidSchema(#[source] Option<serde_json::Error>),

    #[error("Seed must be an unsigned integer")]
    InvalidSeed,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AmountOutOfRange { .. }
            | Self::MissingSchema
            | Self::InvalidSchema(_)
            | Self::InvalidSeed => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AmountOutOfRange { .. } => "amount_out_of_range",
            Self::MissingSchema => "missing_schema",
            Self::InvalidSchema(_) => "invalid_schema",
            Self::InvalidSeed => "invalid_seed",
            Self::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
