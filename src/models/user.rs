//! User model.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::graph::Properties;
use crate::models::schema::{Allocation, EntitySchema, KeyType, OptionalField};

/// A user. Identifiers are assigned by the store, one past the current maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub email: String,
}

/// Input for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Fields a user update may change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl EntitySchema for User {
    const LABEL: &'static str = "User";
    const KEY: &'static str = "user_id";
    const KEY_TYPE: KeyType = KeyType::NumericText;
    const ALLOCATION: Allocation = Allocation::Sequential;
    const OPTIONAL: &'static [OptionalField] = &[OptionalField::derived("email", example_email)];

    type Draft = NewUser;
    type Patch = UserPatch;
}

/// `lower(name)@example.com`, for nodes stored without an email.
pub(crate) fn example_email(props: &Properties) -> Option<JsonValue> {
    let name = props.get("name")?.as_str()?;
    Some(JsonValue::String(format!(
        "{}@example.com",
        name.to_lowercase()
    )))
}
