use axum::{
    http::{Method, Uri},
    response::{IntoResponse, Response},
};

use super::AppError;

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found(uri: Uri) -> Response {
    AppError::NotFound(format!("No route for {}", uri.path())).into_response()
}

/// Handler for 405 Method Not Allowed errors.
///
/// Mount it as a `MethodRouter` fallback so wrong-method requests get a JSON body.
pub async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    AppError::MethodNotAllowed(format!("Method {} is not allowed for {}", method, uri.path()))
        .into_response()
}
