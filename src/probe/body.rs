//! Decoding of response bodies into tagged JSON shapes

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

/// Response body could not be decoded as JSON
#[derive(Debug, Error)]
#[error("{0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// A decoded JSON body, tagged by its top-level shape
#[derive(Debug, Clone, PartialEq)]
pub enum JsonBody {
    Object(Map<String, Value>),
    Array(Vec<Value>),
    /// Strings, numbers, booleans and null
    Scalar(Value),
}

impl JsonBody {
    /// Parses raw response text
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from(value))
    }

    /// True when the body is an object carrying `name`
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            JsonBody::Object(map) => map.get(name),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            JsonBody::Array(items) => Some(items),
            _ => None,
        }
    }

    /// JSON type name of the top-level value
    pub fn kind(&self) -> &'static str {
        match self {
            JsonBody::Object(_) => "object",
            JsonBody::Array(_) => "array",
            JsonBody::Scalar(Value::String(_)) => "string",
            JsonBody::Scalar(Value::Number(_)) => "number",
            JsonBody::Scalar(Value::Bool(_)) => "boolean",
            JsonBody::Scalar(_) => "null",
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            JsonBody::Object(map) => Value::Object(map),
            JsonBody::Array(items) => Value::Array(items),
            JsonBody::Scalar(value) => value,
        }
    }
}

impl From<Value> for JsonBody {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => JsonBody::Object(map),
            Value::Array(items) => JsonBody::Array(items),
            other => JsonBody::Scalar(other),
        }
    }
}

impl fmt::Display for JsonBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            JsonBody::Object(map) => serde_json::to_string(map),
            JsonBody::Array(items) => serde_json::to_string(items),
            JsonBody::Scalar(value) => serde_json::to_string(value),
        };
        match value {
            Ok(text) => f.write_str(&text),
            Err(_) => Err(fmt::Error),
        }
    }
}
