//! Row and streaming types for query results.

use crate::error::AppError;
use futures::Stream;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::pin::Pin;

/// Parameters for Cypher statements, keyed by name without the `$` prefix.
pub type Params = HashMap<String, JsonValue>;

/// Property map of a node as returned by `properties(n)`.
pub type Properties = serde_json::Map<String, JsonValue>;

/// A stream of rows from a query result.
pub type RowStream<'a> = Pin<Box<dyn Stream<Item = Result<Row, AppError>> + Send + 'a>>;

/// A single record from a query result: field alias to JSON value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    data: HashMap<String, JsonValue>,
}

impl Row {
    /// Creates a new row from a map of column names to values.
    pub fn new(data: HashMap<String, JsonValue>) -> Self {
        Self { data }
    }

    /// Builds a row from `(alias, value)` pairs.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, JsonValue)>,
        K: Into<String>,
    {
        Self {
            data: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Gets a value by column alias, deserializing to the requested type.
    ///
    /// # Errors
    ///
    /// Returns an error if the alias is missing or deserialization fails.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, AppError> {
        self.data
            .get(key)
            .ok_or_else(|| AppError::Internal(format!("column not found: {}", key)))
            .and_then(|v| decode(key, v.clone()))
    }

    /// Gets a value, returning `None` if the alias is missing or null.
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        match self.data.get(key) {
            Some(v) if v.is_null() => Ok(None),
            Some(v) => decode(key, v.clone()).map(Some),
            None => Ok(None),
        }
    }

    /// Moves a value out of the row without cloning it.
    pub fn take<T: DeserializeOwned>(&mut self, key: &str) -> Result<T, AppError> {
        let value = self
            .data
            .remove(key)
            .ok_or_else(|| AppError::Internal(format!("column not found: {}", key)))?;
        decode(key, value)
    }
}

fn decode<T: DeserializeOwned>(key: &str, value: JsonValue) -> Result<T, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::Internal(format!("failed to deserialize '{}': {}", key, e)))
}
