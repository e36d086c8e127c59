//! Book model.

use serde::{Deserialize, Serialize};

use crate::models::schema::{Allocation, EntitySchema, KeyType};

/// A book. The caller picks the id; reusing one is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
}

/// Fields a book update may change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl EntitySchema for Book {
    const LABEL: &'static str = "Book";
    const KEY: &'static str = "id";
    const KEY_TYPE: KeyType = KeyType::Integer;
    const ALLOCATION: Allocation = Allocation::Checked;

    type Draft = Book;
    type Patch = BookPatch;
}
