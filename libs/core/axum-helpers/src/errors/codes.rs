//! Type-safe error codes for API responses.
//!
//! This module provides a single source of truth for error codes used across
//! the gateway. Each error code includes:
//! - String representation for client consumption (e.g., "INVALID_INPUT")
//! - Integer code for logging and monitoring (e.g., 1001)
//! - Default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidInput;
//! assert_eq!(code.as_str(), "INVALID_INPUT");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request parameters are invalid");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Parameters are missing, of the wrong kind, or out of range
    InvalidInput,

    /// Request body is not valid JSON
    InvalidJson,

    /// HTTP method is not accepted by the operation
    MethodNotAllowed,

    /// No operation is mounted at the requested path
    NotFound,

    // Backing store errors (2000-2999)
    /// The store rejected or failed the operation
    StoreExecution,

    /// The store could not be reached
    StoreConnection,

    /// The store did not answer before the request deadline
    StoreTimeout,

    /// The store answered with a payload that does not match the operation's result shape
    StoreDecode,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::InvalidJson => "INVALID_JSON",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::NotFound => "NOT_FOUND",
            Self::StoreExecution => "STORE_EXECUTION",
            Self::StoreConnection => "STORE_CONNECTION",
            Self::StoreTimeout => "STORE_TIMEOUT",
            Self::StoreDecode => "STORE_DECODE",
        }
    }

    /// Get the integer error code for logging and monitoring.
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidInput => 1001,
            Self::InvalidJson => 1002,
            Self::MethodNotAllowed => 1003,
            Self::NotFound => 1004,

            Self::StoreExecution => 2001,
            Self::StoreConnection => 2002,
            Self::StoreTimeout => 2003,
            Self::StoreDecode => 2004,
        }
    }

    /// Get the default user-facing error message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InvalidInput => "Request parameters are invalid",
            Self::InvalidJson => "Invalid JSON format",
            Self::MethodNotAllowed => "Method not allowed",
            Self::NotFound => "Resource not found",
            Self::StoreExecution => "The backing store failed the operation",
            Self::StoreConnection => "The backing store is unreachable",
            Self::StoreTimeout => "The backing store did not respond in time",
            Self::StoreDecode => "Unexpected response shape from the backing store",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string_representation() {
        assert_eq!(ErrorCode::InvalidInput.as_str(), "INVALID_INPUT");
        assert_eq!(ErrorCode::MethodNotAllowed.as_str(), "METHOD_NOT_ALLOWED");
        assert_eq!(ErrorCode::StoreExecution.as_str(), "STORE_EXECUTION");
    }

    #[test]
    fn test_error_code_integer_codes() {
        assert_eq!(ErrorCode::InvalidInput.code(), 1001);
        assert_eq!(ErrorCode::StoreDecode.code(), 2004);
    }

    #[test]
    fn test_error_code_display_matches_serde() {
        let code = ErrorCode::StoreTimeout;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, format!("\"{}\"", code));
    }

    #[test]
    fn test_error_code_deserialization() {
        let code: ErrorCode = serde_json::from_str("\"INVALID_JSON\"").unwrap();
        assert_eq!(code, ErrorCode::InvalidJson);
    }
}
