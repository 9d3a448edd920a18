//! Observability utilities for the social gateway.
//!
//! This crate provides:
//! - Prometheus metrics recording and export
//! - Per-operation store metrics
//! - Axum middleware for automatic request metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{OperationMetrics, init_metrics, metrics_handler};
//!
//! init_metrics()?;
//!
//! OperationMetrics::record("createUser", Outcome::Success, elapsed);
//!
//! let app = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

pub mod middleware;
pub mod store;

pub use middleware::metrics_middleware;
pub use store::{OperationMetrics, Outcome};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus metrics recorder.
///
/// Safe to call more than once; the recorder is only installed the first time.
///
/// # Errors
/// Returns an error if another global metrics recorder was already installed.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;

        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();

        Ok(handle)
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::describe_counter;
    use metrics::describe_histogram;

    describe_counter!(
        "http_requests_total",
        "HTTP requests by method, operation and status"
    );
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds by operation"
    );
    describe_counter!(
        "http_requests_errors_total",
        "HTTP requests answered with 4xx or 5xx, by operation"
    );

    describe_counter!(
        "store_operations_total",
        "Store operations by operation name and outcome"
    );
    describe_histogram!(
        "store_operation_duration_seconds",
        "Store round-trip duration in seconds by operation name"
    );
    describe_counter!(
        "rejected_requests_total",
        "Requests rejected before reaching the store, by operation and reason"
    );
}
