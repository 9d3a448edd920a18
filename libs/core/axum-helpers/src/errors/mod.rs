pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Standard error response structure.
///
/// This structure is returned for all error responses, providing consistent
/// error information to clients including
/// - `code`: Integer error code for logging/monitoring (e.g., 2001)
/// - `error`: Machine-readable error identifier (e.g., "STORE_EXECUTION")
/// - `message`: Human-readable error message
/// - `details`: Optional additional error details (e.g., the offending parameter)
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 1001,
///   "error": "INVALID_INPUT",
///   "message": "parameter 'age' must be an integer in 0..=4294967295",
///   "details": { "parameter": "age" }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Every failure a request can hit is recovered here; none of them take the
/// process down.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Bad Request: {message}")]
    BadRequest {
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("Method Not Allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Store error: {message}")]
    Store { code: ErrorCode, message: String },
}

impl AppError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidJson(_) | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::InvalidJson(msg) => {
                tracing::info!(error_code = ErrorCode::InvalidJson.code(), "Invalid JSON: {}", msg);
                ErrorResponse::new(ErrorCode::InvalidJson, msg)
            }
            AppError::BadRequest { message, details } => {
                tracing::info!(
                    error_code = ErrorCode::InvalidInput.code(),
                    "Bad request: {}",
                    message
                );
                let response = ErrorResponse::new(ErrorCode::InvalidInput, message);
                match details {
                    Some(details) => response.with_details(details),
                    None => response,
                }
            }
            AppError::MethodNotAllowed(msg) => {
                tracing::info!("Method not allowed: {}", msg);
                ErrorResponse::new(ErrorCode::MethodNotAllowed, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                ErrorResponse::new(ErrorCode::NotFound, msg)
            }
            AppError::Store { code, message } => {
                tracing::error!(error_code = code.code(), "Store error: {}", message);
                ErrorResponse::new(code, message)
            }
        };

        (status, Json(body)).into_response()
    }
}
