use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

use crate::binder::BindError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Bind(#[from] BindError),

    /// The store answered with a non-200 status; the message is its body, verbatim.
    #[error("{0}")]
    Store(String),

    #[error("store unreachable: {0}")]
    Connection(String),

    #[error("store call '{operation}' exceeded the {}s deadline", .deadline.as_secs())]
    Timeout {
        operation: String,
        deadline: Duration,
    },

    #[error("unexpected store response: {0}")]
    Decode(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    /// Short outcome label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Bind(BindError::InvalidJson(_)) => "invalid_json",
            GatewayError::Bind(_) => "invalid_input",
            GatewayError::Store(_) => "store_error",
            GatewayError::Connection(_) => "unreachable",
            GatewayError::Timeout { .. } => "timeout",
            GatewayError::Decode(_) => "decode",
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Connection(err.to_string())
        }
    }
}

/// Convert GatewayError to AppError for standardized error responses
impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Bind(BindError::InvalidJson(msg)) => AppError::InvalidJson(msg),
            GatewayError::Bind(bind) => {
                let details = bind.parameter().map(|p| json!({ "parameter": p }));
                AppError::BadRequest {
                    message: bind.to_string(),
                    details,
                }
            }
            GatewayError::Store(message) => AppError::Store {
                code: ErrorCode::StoreExecution,
                message,
            },
            err @ GatewayError::Connection(_) => AppError::Store {
                code: ErrorCode::StoreConnection,
                message: err.to_string(),
            },
            err @ GatewayError::Timeout { .. } => AppError::Store {
                code: ErrorCode::StoreTimeout,
                message: err.to_string(),
            },
            err @ GatewayError::Decode(_) => AppError::Store {
                code: ErrorCode::StoreDecode,
                message: err.to_string(),
            },
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
