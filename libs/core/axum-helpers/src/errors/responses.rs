//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed JSON or parameters that violate the operation schema",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "INVALID_INPUT",
        "message": "missing required parameter 'email'",
        "details": { "parameter": "email" }
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Method Not Allowed",
    content_type = "application/json",
    example = json!({
        "code": 1003,
        "error": "METHOD_NOT_ALLOWED",
        "message": "Method GET is not allowed for /createUser"
    })
)]
pub struct MethodNotAllowedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Backing store failed, timed out, or returned an unexpected shape",
    content_type = "application/json",
    example = json!({
        "code": 2001,
        "error": "STORE_EXECUTION",
        "message": "Node not found"
    })
)]
pub struct StoreErrorResponse(pub ErrorResponse);
