//! Request metrics for the gateway's HTTP surface.
//!
//! Every catalog operation is served on `/{operation}`, so series are labelled
//! with the operation name taken from the matched route. Requests that no
//! route served share the `unmatched` label; raw URIs never become labels.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, Response},
    middleware::Next,
};
use metrics::{counter, histogram};
use std::time::Instant;

/// Label used for requests that matched no route (404 fallback).
const UNMATCHED: &str = "unmatched";

/// Records, per `operation` label:
/// - `http_requests_total` with method, operation and status
/// - `http_request_duration_seconds` with method and operation
/// - `http_requests_errors_total` for 4xx and 5xx answers
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/createUser", post(create_user))
///     .layer(middleware::from_fn(metrics_middleware));
/// ```
pub async fn metrics_middleware(
    matched_path: Option<MatchedPath>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let started = Instant::now();
    let method = request.method().as_str().to_owned();
    let operation = operation_label(matched_path.as_ref());

    let response = next.run(request).await;
    let status = response.status();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "operation" => operation.clone(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method.clone(),
        "operation" => operation.clone()
    )
    .record(started.elapsed().as_secs_f64());

    if status.is_client_error() || status.is_server_error() {
        counter!(
            "http_requests_errors_total",
            "method" => method,
            "operation" => operation,
            "status" => status.as_u16().to_string()
        )
        .increment(1);
    }

    response
}

/// Operation label for a matched route: `/createUser` becomes `createUser`,
/// `/health` becomes `health`. Nested templates are kept as-is.
fn operation_label(matched: Option<&MatchedPath>) -> String {
    match matched.map(MatchedPath::as_str) {
        Some(path) => match path.strip_prefix('/') {
            Some(name) if !name.is_empty() && !name.contains('/') => name.to_owned(),
            _ => path.to_owned(),
        },
        None => UNMATCHED.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, middleware, routing::post};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/createUser", post(|| async { "ok" }))
            .route("/getFollowers", post(|| async { StatusCode::BAD_REQUEST }))
            .layer(middleware::from_fn(metrics_middleware))
    }

    async fn send(uri: &str) -> StatusCode {
        app()
            .oneshot(Request::post(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_series_are_labelled_by_operation() {
        crate::init_metrics().unwrap();

        assert_eq!(send("/createUser").await, StatusCode::OK);
        assert_eq!(send("/getFollowers").await, StatusCode::BAD_REQUEST);
        assert_eq!(send("/no/such/route").await, StatusCode::NOT_FOUND);

        let rendered = crate::metrics_handler().await;
        assert!(rendered.contains(r#"operation="createUser""#));
        assert!(rendered.contains(r#"operation="unmatched""#));
        assert!(!rendered.contains("/no/such/route"));

        let errors: Vec<_> = rendered
            .lines()
            .filter(|l| l.starts_with("http_requests_errors_total{"))
            .collect();
        assert!(errors.iter().any(|l| l.contains(r#"operation="getFollowers""#)));
        assert!(!errors.iter().any(|l| l.contains(r#"operation="createUser""#)));
    }
}
