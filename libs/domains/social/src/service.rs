//! Request pipeline: one body in, at most one store call, one envelope out.

use observability::{OperationMetrics, Outcome};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

use crate::binder::{bind_for, parse_body};
use crate::catalog::Operation;
use crate::client::{StoreClient, decode_for};
use crate::error::{GatewayError, GatewayResult};
use crate::shaper::{Envelope, shape};
use crate::value::BoundParameters;

/// Runs the parse → bind → execute → shape pipeline for one operation.
///
/// Holds the only shared state of the gateway: an immutable store handle and
/// the per-call deadline.
#[derive(Clone)]
pub struct SocialService {
    store: Arc<dyn StoreClient>,
    deadline: Duration,
}

impl SocialService {
    pub fn new(store: Arc<dyn StoreClient>, deadline: Duration) -> Self {
        Self { store, deadline }
    }

    /// Dispatch `operation` with a raw request body.
    ///
    /// Makes exactly one store call, or none when the body is rejected.
    #[instrument(skip(self, operation, body), fields(operation = operation.name))]
    pub async fn dispatch(
        &self,
        operation: &'static Operation,
        body: &[u8],
    ) -> GatewayResult<Envelope> {
        let params = parse_body(body)
            .and_then(|raw| bind_for(operation, &raw))
            .map_err(|e| {
                let err = GatewayError::from(e);
                OperationMetrics::record_rejected(operation.name, err.kind());
                err
            })?;

        let result = self.execute(operation, &params).await?;
        Ok(shape(operation, result))
    }

    /// Execute already-bound parameters and check the result shape.
    pub async fn execute(
        &self,
        operation: &'static Operation,
        params: &BoundParameters,
    ) -> GatewayResult<Map<String, Value>> {
        let started = Instant::now();

        let outcome = match tokio::time::timeout(
            self.deadline,
            self.store.execute(operation.name, params),
        )
        .await
        {
            Ok(Ok(raw)) => decode_for(operation, raw),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(GatewayError::Timeout {
                operation: operation.name.to_string(),
                deadline: self.deadline,
            }),
        };

        let elapsed = started.elapsed();
        match &outcome {
            Ok(_) => {
                info!(
                    operation = operation.name,
                    duration_ms = elapsed.as_millis() as u64,
                    "Store operation succeeded"
                );
                OperationMetrics::record(operation.name, Outcome::Success, elapsed);
            }
            Err(e) => {
                warn!(operation = operation.name, error = %e, "Store operation failed");
                OperationMetrics::record(operation.name, outcome_of(e), elapsed);
            }
        }

        outcome
    }

    /// Probe the store within the deadline.
    pub async fn ready(&self) -> GatewayResult<()> {
        tokio::time::timeout(self.deadline, self.store.ping())
            .await
            .map_err(|_| GatewayError::Timeout {
                operation: "ping".to_string(),
                deadline: self.deadline,
            })?
    }
}

fn outcome_of(err: &GatewayError) -> Outcome {
    match err {
        GatewayError::Timeout { .. } => Outcome::Timeout,
        GatewayError::Connection(_) => Outcome::Unreachable,
        GatewayError::Decode(_) => Outcome::Decode,
        _ => Outcome::StoreError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CREATE_USER, GET_FOLLOWING, GET_USERS};
    use crate::client::MockStoreClient;
    use serde_json::json;

    fn service(mock: MockStoreClient) -> SocialService {
        SocialService::new(Arc::new(mock), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_dispatch_binds_executes_and_wraps() {
        let mut mock = MockStoreClient::new();
        mock.expect_execute()
            .withf(|op, params| {
                op == "createUser"
                    && params.get_str("name") == Some("Alice")
                    && params.get_integer("age") == Some(25)
            })
            .times(1)
            .returning(|_, _| {
                Ok(json!({ "user": { "id": "u1", "name": "Alice", "age": 25, "email": "a@x" } }))
            });

        let body = br#"{"name": "Alice", "age": 25, "email": "a@x"}"#;
        let envelope = service(mock).dispatch(&CREATE_USER, body).await.unwrap();

        assert!(envelope.is_wrapped());
        assert_eq!(envelope.object()["user"]["id"], "u1");
    }

    #[tokio::test]
    async fn test_dispatch_unwrapped_list() {
        let mut mock = MockStoreClient::new();
        mock.expect_execute()
            .withf(|op, params| op == "getFollowing" && params.get_str("user_id") == Some("u1"))
            .times(1)
            .returning(|_, _| Ok(json!({ "following": [] })));

        let envelope = service(mock)
            .dispatch(&GET_FOLLOWING, br#"{"user_id": "u1"}"#)
            .await
            .unwrap();
        assert!(!envelope.is_wrapped());
    }

    #[tokio::test]
    async fn test_malformed_body_never_calls_store() {
        let mut mock = MockStoreClient::new();
        mock.expect_execute().times(0);

        let err = service(mock)
            .dispatch(&CREATE_USER, b"{not json")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_json");
    }

    #[tokio::test]
    async fn test_schema_violation_never_calls_store() {
        let mut mock = MockStoreClient::new();
        mock.expect_execute().times(0);

        let err = service(mock)
            .dispatch(&CREATE_USER, br#"{"name": "A", "age": -3, "email": "a@x"}"#)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
    }

    #[tokio::test]
    async fn test_parameterless_operation_accepts_empty_body() {
        let mut mock = MockStoreClient::new();
        mock.expect_execute()
            .withf(|op, params| op == "getUsers" && params.is_empty())
            .times(1)
            .returning(|_, _| Ok(json!({ "users": [] })));

        let envelope = service(mock).dispatch(&GET_USERS, b"").await.unwrap();
        assert_eq!(serde_json::to_value(&envelope).unwrap(), json!([{ "users": [] }]));
    }

    #[tokio::test]
    async fn test_store_error_is_propagated_verbatim() {
        let mut mock = MockStoreClient::new();
        mock.expect_execute()
            .times(1)
            .returning(|_, _| Err(GatewayError::Store("Node not found".to_string())));

        let err = service(mock)
            .dispatch(&GET_FOLLOWING, br#"{"user_id": "ghost"}"#)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Node not found");
    }

    #[tokio::test]
    async fn test_wrong_result_shape_is_decode_error() {
        let mut mock = MockStoreClient::new();
        mock.expect_execute()
            .times(1)
            .returning(|_, _| Ok(json!({ "users": "not a list" })));

        let err = service(mock).dispatch(&GET_USERS, b"{}").await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_exceeded_is_timeout() {
        struct SlowStore;

        #[async_trait::async_trait]
        impl StoreClient for SlowStore {
            async fn execute(&self, _: &str, _: &BoundParameters) -> GatewayResult<Value> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(json!({ "users": [] }))
            }

            async fn ping(&self) -> GatewayResult<()> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            }
        }

        let service = SocialService::new(Arc::new(SlowStore), Duration::from_secs(1));

        let err = service.dispatch(&GET_USERS, b"").await.unwrap_err();
        assert!(matches!(err, GatewayError::Timeout { .. }));

        let err = service.ready().await.unwrap_err();
        assert_eq!(err.kind(), "timeout");
    }
}
