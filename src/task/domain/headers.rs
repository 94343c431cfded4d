//! HTTP header mappings and their two accepted input encodings.

use super::HeadersError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Canonical header mapping stored with a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers(BTreeMap<String, String>);

impl Headers {
    /// Creates an empty header mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the value of a header, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no headers are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates headers in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl FromIterator<(String, String)> for Headers {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Header input exactly as a client supplied it.
///
/// Clients may send headers either as a JSON object or as a string holding
/// JSON-encoded object text. Both resolve to the same [`Headers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadersInput {
    /// JSON-encoded object text, e.g. `"{\"foo\":\"bar\"}"`.
    RawString(String),
    /// An already structured mapping.
    RawMapping(Map<String, Value>),
}

impl HeadersInput {
    /// Classifies a raw JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`HeadersError::NotAnObject`] for values that are neither a
    /// string nor an object.
    pub fn from_value(value: Value) -> Result<Self, HeadersError> {
        match value {
            Value::String(text) => Ok(Self::RawString(text)),
            Value::Object(map) => Ok(Self::RawMapping(map)),
            other => Err(HeadersError::NotAnObject(json_kind(&other))),
        }
    }

    /// Resolves the input into a canonical header mapping.
    ///
    /// # Errors
    ///
    /// Returns [`HeadersError`] when a string is not valid JSON, does not
    /// decode to an object, or any header value is not a string.
    pub fn resolve(self) -> Result<Headers, HeadersError> {
        let map = match self {
            Self::RawMapping(map) => map,
            Self::RawString(text) => {
                let decoded: Value = serde_json::from_str(&text)
                    .map_err(|err| HeadersError::InvalidJson(err.to_string()))?;
                match decoded {
                    Value::Object(map) => map,
                    other => return Err(HeadersError::NotAnObject(json_kind(&other))),
                }
            }
        };

        map.into_iter()
            .map(|(name, value)| match value {
                Value::String(text) => Ok((name, text)),
                _ => Err(HeadersError::NonStringValue(name)),
            })
            .collect()
    }
}

/// Returns a short name for the JSON type of `value`.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
