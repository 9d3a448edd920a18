//! Query client: the seam between the gateway and the backing store.
//!
//! [`StoreClient`] is the injected dependency. [`HelixClient`] speaks the
//! HelixDB HTTP wire format; tests and local demos substitute
//! [`InMemoryStore`](crate::memory::InMemoryStore) or a mock.

use async_trait::async_trait;
use core_config::store::StoreConfig;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::catalog::{Operation, ResultShape};
use crate::error::{GatewayError, GatewayResult};
use crate::value::BoundParameters;

/// Issues named operations against the backing store.
///
/// Implementations hold no per-request state; one handle is shared by all
/// requests. Each call is a fresh round trip: no caching, no retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Execute `operation` with `params` and return the raw JSON payload.
    async fn execute(&self, operation: &str, params: &BoundParameters) -> GatewayResult<Value>;

    /// Check that the store can be reached.
    async fn ping(&self) -> GatewayResult<()>;
}

/// HTTP client for a HelixDB-compatible store.
///
/// `POST {endpoint}:{port}/{operation}` with a JSON object body and an
/// optional `x-api-key` header. 200 means a JSON payload; any other status is
/// an error whose message is the response body.
#[derive(Clone)]
pub struct HelixClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HelixClient {
    pub fn new(config: &StoreConfig) -> GatewayResult<Self> {
        let http = Client::builder()
            .connect_timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, operation: &str) -> String {
        format!("{}/{}", self.base_url, operation)
    }
}

#[async_trait]
impl StoreClient for HelixClient {
    async fn execute(&self, operation: &str, params: &BoundParameters) -> GatewayResult<Value> {
        let mut request = self.http.post(self.url(operation)).json(params);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        debug!(operation, params = params.len(), "Sending store request");
        let response = request.send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let message = response.text().await?;
            warn!(operation, status = status.as_u16(), "Store rejected request");
            return Err(GatewayError::Store(message));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn ping(&self) -> GatewayResult<()> {
        // any HTTP answer means the store is listening
        self.http.get(&self.base_url).send().await?;
        Ok(())
    }
}

/// Decode a raw store payload into a typed destination.
///
/// A payload of the wrong shape fails; it never yields a partially populated
/// or defaulted value.
pub fn decode<T: DeserializeOwned>(raw: Value) -> GatewayResult<T> {
    Ok(serde_json::from_value(raw)?)
}

/// Check a raw payload against the result shape `operation` declares and
/// return it as an object.
pub fn decode_for(operation: &Operation, raw: Value) -> GatewayResult<Map<String, Value>> {
    let Value::Object(object) = raw else {
        return Err(GatewayError::Decode(format!(
            "'{}' returned {} instead of an object",
            operation.name,
            json_kind(&raw)
        )));
    };

    match operation.result {
        ResultShape::Dynamic => {}
        ResultShape::Entity(field) => match object.get(field) {
            Some(Value::Object(_)) => {}
            other => return Err(shape_mismatch(operation, field, "an object", other)),
        },
        ResultShape::List(field) => match object.get(field) {
            Some(Value::Array(_)) => {}
            other => return Err(shape_mismatch(operation, field, "an array", other)),
        },
    }

    Ok(object)
}

fn shape_mismatch(
    operation: &Operation,
    field: &str,
    expected: &str,
    found: Option<&Value>,
) -> GatewayError {
    let found = found.map(json_kind).unwrap_or("nothing");
    GatewayError::Decode(format!(
        "'{}' result field '{}' should be {} but was {}",
        operation.name, field, expected, found
    ))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
