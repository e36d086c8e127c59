//! Directed edge types between entity labels.

use serde::Serialize;

use crate::models::author::Author;
use crate::models::book::Book;
use crate::models::school::School;
use crate::models::schema::EntitySchema;

/// A directed, labeled edge type addressed by the endpoints' natural keys.
///
/// The `*_NAME`/`*_PLURAL` constants name each side in routes and response
/// bodies; the `*_FIELD` constants are the request fields of a link call.
pub trait Relationship: Clone + Send + Sync + 'static {
    type Source: EntitySchema;
    type Target: EntitySchema;

    const EDGE: &'static str;
    /// Natural-key property on source nodes.
    const SOURCE_KEY: &'static str;
    /// Natural-key property on target nodes.
    const TARGET_KEY: &'static str;

    const SOURCE_NAME: &'static str;
    const SOURCE_PLURAL: &'static str;
    const TARGET_NAME: &'static str;
    const TARGET_PLURAL: &'static str;

    const SOURCE_FIELD: &'static str;
    const TARGET_FIELD: &'static str;

    /// Path prefix the routes for this edge live under.
    const ROUTE: &'static str;
}

/// `(:Book {title})-[:WRITTEN_BY]->(:Author {name})`
#[derive(Debug, Clone, Copy, Default)]
pub struct WrittenBy;

impl Relationship for WrittenBy {
    type Source = Book;
    type Target = Author;

    const EDGE: &'static str = "WRITTEN_BY";
    const SOURCE_KEY: &'static str = "title";
    const TARGET_KEY: &'static str = "name";

    const SOURCE_NAME: &'static str = "book";
    const SOURCE_PLURAL: &'static str = "books";
    const TARGET_NAME: &'static str = "author";
    const TARGET_PLURAL: &'static str = "authors";

    const SOURCE_FIELD: &'static str = "book_title";
    const TARGET_FIELD: &'static str = "author_name";

    const ROUTE: &'static str = "/book2author";
}

/// `(:Author {name})-[:AFFILIATED_WITH]->(:School {title})`
#[derive(Debug, Clone, Copy, Default)]
pub struct AffiliatedWith;

impl Relationship for AffiliatedWith {
    type Source = Author;
    type Target = School;

    const EDGE: &'static str = "AFFILIATED_WITH";
    const SOURCE_KEY: &'static str = "name";
    const TARGET_KEY: &'static str = "title";

    const SOURCE_NAME: &'static str = "author";
    const SOURCE_PLURAL: &'static str = "authors";
    const TARGET_NAME: &'static str = "school";
    const TARGET_PLURAL: &'static str = "schools";

    const SOURCE_FIELD: &'static str = "author_name";
    const TARGET_FIELD: &'static str = "school_name";

    const ROUTE: &'static str = "/author2school";
}

/// The endpoints of a link that now exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub source: String,
    pub target: String,
}

/// A node's natural key and the keys one hop away along an edge type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Neighbors {
    pub anchor: String,
    pub related: Vec<String>,
}
