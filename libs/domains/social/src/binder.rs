//! Validation and normalization of request parameter bags.
//!
//! [`parse_body`] turns raw request bytes into a JSON object, [`bind`]
//! converts any object into [`BoundParameters`] and [`bind_for`] additionally
//! enforces an operation's schema. None of them have side effects.

use serde_json::Map;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::catalog::{Operation, ParamKind};
use crate::value::{BoundParameters, Value};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("parameter '{0}' must not be null")]
    NullValue(String),

    #[error("parameter '{parameter}' must be {expected}")]
    InvalidType { parameter: String, expected: String },

    #[error("parameter '{parameter}' is out of range: expected {expected}")]
    OutOfRange { parameter: String, expected: String },
}

impl BindError {
    /// Name of the offending parameter, if the error concerns one.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            BindError::MissingParameter(p)
            | BindError::UnknownParameter(p)
            | BindError::NullValue(p) => Some(p),
            BindError::InvalidType { parameter, .. } | BindError::OutOfRange { parameter, .. } => {
                Some(parameter)
            }
            BindError::InvalidJson(_) | BindError::NotAnObject => None,
        }
    }

    fn invalid_type(parameter: &str, kind: ParamKind) -> Self {
        BindError::InvalidType {
            parameter: parameter.to_string(),
            expected: kind.describe(),
        }
    }

    fn out_of_range(parameter: &str, kind: ParamKind) -> Self {
        BindError::OutOfRange {
            parameter: parameter.to_string(),
            expected: kind.describe(),
        }
    }
}

pub type JsonObject = Map<String, serde_json::Value>;

/// Parse a request body into a JSON object.
///
/// An empty (or whitespace-only) body and a literal `null` are both an empty
/// object, so parameterless operations can be called without a body.
pub fn parse_body(body: &[u8]) -> Result<JsonObject, BindError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(serde_json::Value::Null) => Ok(Map::new()),
        Ok(_) => Err(BindError::NotAnObject),
        Err(e) => Err(BindError::InvalidJson(e.to_string())),
    }
}

/// Bind every key of `raw` without a schema.
///
/// Integers stay integers, other numbers become floats, arrays must hold only
/// numbers and become vectors, objects recurse. `null` and integers beyond
/// `i64` are rejected.
pub fn bind(raw: &JsonObject) -> Result<BoundParameters, BindError> {
    raw.iter()
        .map(|(key, value)| bind_value(key, value).map(|v| (key.clone(), v)))
        .collect()
}

fn bind_value(key: &str, value: &serde_json::Value) -> Result<Value, BindError> {
    match value {
        serde_json::Value::Null => Err(BindError::NullValue(key.to_string())),
        serde_json::Value::Bool(b) => Ok(Value::Boolean(*b)),
        serde_json::Value::String(s) => Ok(Value::String(s.clone())),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Integer(i))
            } else if n.is_u64() {
                Err(BindError::OutOfRange {
                    parameter: key.to_string(),
                    expected: format!("an integer <= {}", i64::MAX),
                })
            } else {
                n.as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| BindError::invalid_type(key, ParamKind::Float))
            }
        }
        serde_json::Value::Array(items) => bind_vector(key, items).map(Value::Vector),
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(k, v)| bind_value(k, v).map(|v| (k.clone(), v)))
            .collect::<Result<BTreeMap<_, _>, BindError>>()
            .map(Value::Map),
    }
}

fn bind_vector(key: &str, items: &[serde_json::Value]) -> Result<Vec<f64>, BindError> {
    items
        .iter()
        .map(|item| match item {
            serde_json::Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| BindError::invalid_type(key, ParamKind::Vector)),
            serde_json::Value::Null => Err(BindError::NullValue(key.to_string())),
            _ => Err(BindError::invalid_type(key, ParamKind::Vector)),
        })
        .collect()
}

/// Bind `raw` against the schema of `operation`.
///
/// Every declared parameter is required and no other key is accepted.
pub fn bind_for(operation: &Operation, raw: &JsonObject) -> Result<BoundParameters, BindError> {
    if let Some(unknown) = raw.keys().find(|key| operation.param(key).is_none()) {
        return Err(BindError::UnknownParameter(unknown.clone()));
    }

    operation
        .params
        .iter()
        .map(|spec| -> Result<(String, Value), BindError> {
            let value = raw
                .get(spec.name)
                .ok_or_else(|| BindError::MissingParameter(spec.name.to_string()))?;
            Ok((spec.name.to_string(), bind_kind(spec.name, spec.kind, value)?))
        })
        .collect()
}

fn bind_kind(name: &str, kind: ParamKind, value: &serde_json::Value) -> Result<Value, BindError> {
    if value.is_null() {
        return Err(BindError::NullValue(name.to_string()));
    }

    match kind {
        ParamKind::String => value
            .as_str()
            .map(Value::from)
            .ok_or_else(|| BindError::invalid_type(name, kind)),
        ParamKind::U32 => {
            let n = value
                .as_number()
                .filter(|n| n.is_i64() || n.is_u64())
                .ok_or_else(|| BindError::invalid_type(name, kind))?;
            n.as_u64()
                .and_then(|u| u32::try_from(u).ok())
                .map(|u| Value::Integer(i64::from(u)))
                .ok_or_else(|| BindError::out_of_range(name, kind))
        }
        ParamKind::Integer { min } => {
            let n = value
                .as_number()
                .filter(|n| n.is_i64() || n.is_u64())
                .ok_or_else(|| BindError::invalid_type(name, kind))?;
            n.as_i64()
                .filter(|i| *i >= min)
                .map(Value::Integer)
                .ok_or_else(|| BindError::out_of_range(name, kind))
        }
        ParamKind::Float => value
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| BindError::invalid_type(name, kind)),
        ParamKind::Vector => value
            .as_array()
            .ok_or_else(|| BindError::invalid_type(name, kind))
            .and_then(|items| bind_vector(name, items))
            .map(Value::Vector),
    }
}
