//! School model.

use serde::{Deserialize, Serialize};

use crate::models::schema::{Allocation, EntitySchema, KeyType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSchool {
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchoolPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl EntitySchema for School {
    const LABEL: &'static str = "School";
    const KEY: &'static str = "id";
    const KEY_TYPE: KeyType = KeyType::Integer;
    const ALLOCATION: Allocation = Allocation::Sequential;

    type Draft = NewSchool;
    type Patch = SchoolPatch;
}
