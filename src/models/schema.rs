//! The per-label contract every stored entity type declares.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::graph::Properties;

/// How the identifying property is stored and surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// Stored and surfaced as a string.
    Text,
    /// Stored as a decimal string, surfaced as an integer.
    NumericText,
    /// Stored and surfaced as an integer.
    Integer,
}

/// An identifying-property value in its stored form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum KeyValue {
    Text(String),
    Integer(i64),
}

impl KeyValue {
    pub fn to_json(&self) -> JsonValue {
        match self {
            KeyValue::Text(s) => JsonValue::String(s.clone()),
            KeyValue::Integer(i) => JsonValue::from(*i),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Text(s) => f.write_str(s),
            KeyValue::Integer(i) => write!(f, "{}", i),
        }
    }
}

impl KeyType {
    /// Parses a key from its textual form (a path segment).
    pub fn parse(self, raw: &str) -> Result<KeyValue, AppError> {
        match self {
            KeyType::Text => Ok(KeyValue::Text(raw.to_string())),
            KeyType::NumericText | KeyType::Integer => {
                let n: i64 = raw.trim().parse().map_err(|_| {
                    AppError::Validation(format!("identifier must be an integer, got '{}'", raw))
                })?;
                Ok(self.from_sequence(n))
            }
        }
    }

    /// Converts a caller-supplied JSON key into its stored form.
    pub fn from_json(self, value: &JsonValue) -> Option<KeyValue> {
        match (self, value) {
            (KeyType::Text, JsonValue::String(s)) => Some(KeyValue::Text(s.clone())),
            (KeyType::NumericText | KeyType::Integer, JsonValue::Number(n)) => {
                n.as_i64().map(|n| self.from_sequence(n))
            }
            (KeyType::NumericText | KeyType::Integer, JsonValue::String(s)) => {
                self.parse(s).ok()
            }
            _ => None,
        }
    }

    /// The stored key for an allocated integer.
    pub fn from_sequence(self, n: i64) -> KeyValue {
        match self {
            KeyType::Integer => KeyValue::Integer(n),
            KeyType::Text | KeyType::NumericText => KeyValue::Text(n.to_string()),
        }
    }

    /// Converts a stored key into the value exposed on records.
    pub fn to_external(self, stored: &JsonValue) -> Option<JsonValue> {
        match (self, stored) {
            (KeyType::Text, JsonValue::String(_)) => Some(stored.clone()),
            (KeyType::Text, JsonValue::Number(n)) => Some(JsonValue::String(n.to_string())),
            (KeyType::NumericText | KeyType::Integer, JsonValue::Number(n)) => {
                n.as_i64().map(JsonValue::from)
            }
            (KeyType::NumericText | KeyType::Integer, JsonValue::String(s)) => {
                s.trim().parse::<i64>().ok().map(JsonValue::from)
            }
            _ => None,
        }
    }

    /// Cypher expression reading `var.prop` as an integer.
    pub fn numeric_expr(self, var: &str, prop: &str) -> String {
        match self {
            KeyType::Integer => format!("{}.{}", var, prop),
            KeyType::Text | KeyType::NumericText => format!("toInteger({}.{})", var, prop),
        }
    }
}

/// Where an entity's identifier comes from on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    /// Caller supplies the key; create merges on it and overwrites fields.
    Upsert,
    /// Caller supplies the key; create fails if it is already taken.
    Checked,
    /// The repository assigns the next integer for the label.
    Sequential,
}

/// Value an optional field takes when a node lacks it.
#[derive(Clone, Copy)]
pub enum ReadDefault {
    /// The empty string.
    Empty,
    /// Computed from the other properties of the node.
    Derived(fn(&Properties) -> Option<JsonValue>),
}

/// An optional field together with its read-time default.
#[derive(Clone, Copy)]
pub struct OptionalField {
    pub name: &'static str,
    pub default: ReadDefault,
}

impl OptionalField {
    pub const fn empty(name: &'static str) -> Self {
        Self {
            name,
            default: ReadDefault::Empty,
        }
    }

    pub const fn derived(name: &'static str, f: fn(&Properties) -> Option<JsonValue>) -> Self {
        Self {
            name,
            default: ReadDefault::Derived(f),
        }
    }
}

/// A node label with one identifying property and a record shape.
///
/// The implementing type is the record returned to callers. `Draft` is the
/// create input, `Patch` the sparse update input (every field optional).
pub trait EntitySchema: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const LABEL: &'static str;
    /// Identifying property, unique among nodes of `LABEL`.
    const KEY: &'static str;
    const KEY_TYPE: KeyType;
    const ALLOCATION: Allocation;
    const OPTIONAL: &'static [OptionalField] = &[];

    type Draft: Serialize + DeserializeOwned + Send + Sync + 'static;
    type Patch: Serialize + DeserializeOwned + Default + Send + Sync + 'static;

    /// Builds a record from a node's property map.
    ///
    /// Converts the key to its surfaced type and fills absent optional
    /// fields from their read-time defaults before decoding.
    fn from_properties(mut props: Properties) -> Result<Self, AppError> {
        let stored = props.get(Self::KEY).cloned().unwrap_or(JsonValue::Null);
        let key = Self::KEY_TYPE.to_external(&stored).ok_or_else(|| {
            AppError::Internal(format!(
                "{} node has unusable {} value: {}",
                Self::LABEL,
                Self::KEY,
                stored
            ))
        })?;
        props.insert(Self::KEY.to_string(), key);

        for field in Self::OPTIONAL {
            if is_present(props.get(field.name)) {
                continue;
            }
            let value = match field.default {
                ReadDefault::Empty => Some(JsonValue::String(String::new())),
                ReadDefault::Derived(derive) => derive(&props),
            };
            if let Some(value) = value {
                props.insert(field.name.to_string(), value);
            }
        }

        serde_json::from_value(JsonValue::Object(props)).map_err(|e| {
            AppError::Internal(format!("failed to decode {} record: {}", Self::LABEL, e))
        })
    }
}

/// Null and the empty string both count as "not supplied".
pub(crate) fn is_present(value: Option<&JsonValue>) -> bool {
    match value {
        None | Some(JsonValue::Null) => false,
        Some(JsonValue::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Serializes a draft into the properties to store, dropping absent fields.
pub(crate) fn to_properties<T: Serialize>(value: &T) -> Result<Properties, AppError> {
    match serde_json::to_value(value) {
        Ok(JsonValue::Object(map)) => Ok(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        Ok(other) => Err(AppError::Internal(format!(
            "expected an object of fields, got {}",
            other
        ))),
        Err(e) => Err(AppError::Internal(format!("failed to serialize fields: {}", e))),
    }
}
