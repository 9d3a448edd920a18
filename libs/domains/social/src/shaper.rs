//! Reshapes decoded store results into the response contract.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::Operation;

/// Response body for a dispatched operation.
///
/// Serializes untagged: either the store's object as-is or a one-element
/// list holding it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Object(Map<String, Value>),
    Wrapped([Map<String, Value>; 1]),
}

impl Envelope {
    pub fn is_wrapped(&self) -> bool {
        matches!(self, Envelope::Wrapped(_))
    }

    /// The store object inside the envelope.
    pub fn object(&self) -> &Map<String, Value> {
        match self {
            Envelope::Object(object) | Envelope::Wrapped([object]) => object,
        }
    }
}

/// Apply the operation's static wrap flag. Never inspects the result.
pub fn shape(operation: &Operation, result: Map<String, Value>) -> Envelope {
    if operation.wrap {
        Envelope::Wrapped([result])
    } else {
        Envelope::Object(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CATALOG, GET_FOLLOWING, GET_USERS};
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_wrapped_operation_serializes_as_one_element_list() {
        let envelope = shape(&GET_USERS, object(json!({ "users": [] })));
        assert!(envelope.is_wrapped());
        assert_eq!(serde_json::to_value(&envelope).unwrap(), json!([{ "users": [] }]));
    }

    #[test]
    fn test_unwrapped_operation_passes_object_through() {
        let result = object(json!({ "following": [{ "id": "b" }] }));
        let envelope = shape(&GET_FOLLOWING, result.clone());
        assert_eq!(envelope, Envelope::Object(result));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "following": [{ "id": "b" }] })
        );
    }

    #[test]
    fn test_wrapping_follows_flag_regardless_of_content() {
        let results = [
            json!({}),
            json!({ "posts": [] }),
            json!({ "posts": [{ "id": "p1" }] }),
            json!({ "posts": [{ "id": "p1" }, { "id": "p2" }] }),
        ];

        for op in CATALOG {
            for result in &results {
                let envelope = shape(op, object(result.clone()));
                assert_eq!(envelope.is_wrapped(), op.wrap, "{}", op.name);
                assert_eq!(envelope.object(), &object(result.clone()));
            }
        }
    }
}
