//! Author model.

use serde::{Deserialize, Serialize};

use crate::models::schema::{Allocation, EntitySchema, KeyType, OptionalField};
use crate::models::user::example_email;

/// An author. Biographical fields read as `""` when the node lacks them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub author_id: i64,
    pub name: String,
    pub email: String,
    pub gender: String,
    pub birth_date: String,
    pub birth_place: String,
    pub family_members: String,
    pub imdb_id: String,
    pub occupation: String,
}

/// Input for creating an author; only `name` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub birth_place: Option<String>,
    #[serde(default)]
    pub family_members: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
}

/// Fields an author update may change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub birth_place: Option<String>,
    #[serde(default)]
    pub family_members: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
}

impl EntitySchema for Author {
    const LABEL: &'static str = "Author";
    const KEY: &'static str = "author_id";
    const KEY_TYPE: KeyType = KeyType::NumericText;
    const ALLOCATION: Allocation = Allocation::Sequential;
    const OPTIONAL: &'static [OptionalField] = &[
        OptionalField::derived("email", example_email),
        OptionalField::empty("gender"),
        OptionalField::empty("birth_date"),
        OptionalField::empty("birth_place"),
        OptionalField::empty("family_members"),
        OptionalField::empty("imdb_id"),
        OptionalField::empty("occupation"),
    ];

    type Draft = NewAuthor;
    type Patch = AuthorPatch;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sparse_author_node_reads_with_defaults() {
        let props = json!({"author_id": "4", "name": "Jane Austen", "age": 41});
        let author = Author::from_properties(props.as_object().unwrap().clone()).unwrap();

        assert_eq!(author.author_id, 4);
        assert_eq!(author.email, "jane austen@example.com");
        assert_eq!(author.gender, "");
        assert_eq!(author.occupation, "");
    }

    #[test]
    fn test_stored_fields_win_over_defaults() {
        let props = json!({
            "author_id": "4",
            "name": "Jane Austen",
            "email": "jane@austen.org",
            "occupation": "novelist"
        });
        let author = Author::from_properties(props.as_object().unwrap().clone()).unwrap();

        assert_eq!(author.email, "jane@austen.org");
        assert_eq!(author.occupation, "novelist");
    }
}
