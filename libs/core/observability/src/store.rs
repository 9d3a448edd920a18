//! Metrics for calls made against the backing store.

use metrics::{counter, histogram};
use std::time::Duration;

/// How a store round-trip ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    StoreError,
    Timeout,
    Unreachable,
    Decode,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::StoreError => "store_error",
            Outcome::Timeout => "timeout",
            Outcome::Unreachable => "unreachable",
            Outcome::Decode => "decode",
        }
    }
}

/// Store metrics recorder
pub struct OperationMetrics;

impl OperationMetrics {
    /// Record one store round-trip for `operation`.
    pub fn record(operation: &'static str, outcome: Outcome, elapsed: Duration) {
        counter!(
            "store_operations_total",
            "operation" => operation,
            "outcome" => outcome.as_str()
        )
        .increment(1);
        histogram!("store_operation_duration_seconds", "operation" => operation)
            .record(elapsed.as_secs_f64());

        tracing::debug!(
            operation = operation,
            outcome = outcome.as_str(),
            duration_ms = elapsed.as_millis() as u64,
            "Store operation finished"
        );
    }

    /// Record a request rejected before any store call (bad JSON, schema mismatch).
    pub fn record_rejected(operation: &'static str, reason: &'static str) {
        counter!(
            "rejected_requests_total",
            "operation" => operation,
            "reason" => reason
        )
        .increment(1);
    }
}
