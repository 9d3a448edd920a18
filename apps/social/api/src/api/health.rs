//! Readiness check backed by a real store probe.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::{HealthCheckFuture, run_health_checks};

/// Probes the store within the request deadline.
///
/// `/health` stays store-free; this is the endpoint that reports whether
/// operations can actually be served.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "store",
        Box::pin(async {
            state
                .service
                .ready()
                .await
                .map_err(|e| format!("Store probe failed: {}", e))
        }),
    )];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
