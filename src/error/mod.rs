// Error types for the food-detector service

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream model error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DetectorError {
    /// Downgrade upstream failures to plain internal errors.
    ///
    /// The freeform endpoint reports every non-input failure as HTTP 500
    /// rather than 502; input validation errors keep their 400 status.
    pub fn into_lenient(self) -> Self {
        match self {
            DetectorError::Upstream(msg) => DetectorError::Internal(msg),
            other => other,
        }
    }
}

// Convert DetectorError to HTTP responses for Axum
impl IntoResponse for DetectorError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            DetectorError::InvalidInput(_) => {
                (StatusCode::BAD_REQUEST, "invalid_input", self.to_string())
            }
            DetectorError::Upstream(_) => {
                (StatusCode::BAD_GATEWAY, "upstream_error", self.to_string())
            }
            DetectorError::Config(_) | DetectorError::ConfigParsing(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error", self.to_string())
            }
            _ => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", self.to_string())
            }
        };

        let body = json!({
            "type": "error",
            "error": {
                "type": error_type,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, DetectorError>;
