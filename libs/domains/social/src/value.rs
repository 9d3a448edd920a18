//! Parameter values sent to the store.
//!
//! A [`Value`] is the tagged form of one parameter. It deliberately has no
//! null variant and no general array: the only sequence the store accepts is a
//! vector of floats.

use serde::Serialize;
use std::collections::BTreeMap;

/// One bound parameter value.
///
/// Serializes untagged, so `Integer(25)` goes over the wire as `25` and
/// `Vector(vec![0.1])` as `[0.1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Vector(Vec<f64>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Vector(_) => "vector",
            Value::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Vector(v)
    }
}

/// Validated parameters for one store call.
///
/// Key order is irrelevant to the store; a `BTreeMap` keeps the wire body
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BoundParameters(BTreeMap<String, Value>);

impl BoundParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_integer)
    }

    pub fn get_vector(&self, key: &str) -> Option<&[f64]> {
        self.get(key).and_then(Value::as_vector)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for BoundParameters {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_untagged() {
        let mut params = BoundParameters::new();
        params.insert("name", "Alice");
        params.insert("age", 25i64);
        params.insert("vector", vec![0.1, 0.2]);

        let wire = serde_json::to_value(&params).unwrap();
        assert_eq!(wire, json!({"name": "Alice", "age": 25, "vector": [0.1, 0.2]}));
    }

    #[test]
    fn test_integer_and_float_are_distinct() {
        assert_ne!(Value::Integer(1), Value::Float(1.0));
        assert_eq!(Value::Integer(1).type_name(), "integer");
    }

    #[test]
    fn test_typed_accessors() {
        let mut params = BoundParameters::new();
        params.insert("user_id", "u-1");
        params.insert("k", 3i64);

        assert_eq!(params.get_str("user_id"), Some("u-1"));
        assert_eq!(params.get_integer("k"), Some(3));
        assert_eq!(params.get_str("k"), None);
        assert!(params.get_vector("vector").is_none());
    }

    #[test]
    fn test_nested_map_serializes_as_object() {
        let inner: BTreeMap<String, Value> =
            [("flag".to_string(), Value::Boolean(true))].into_iter().collect();
        let value = Value::Map(inner);
        assert_eq!(serde_json::to_value(&value).unwrap(), json!({"flag": true}));
    }
}
