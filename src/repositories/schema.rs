//! Store-wide schema setup and health checks.

use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::Graph;
use crate::models::{Author, Book, Company, EntitySchema, School, User};

/// Labels and the property that must be unique under each.
const UNIQUE_KEYS: &[(&str, &str)] = &[
    (Company::LABEL, Company::KEY),
    (User::LABEL, User::KEY),
    (Author::LABEL, Author::KEY),
    (Book::LABEL, Book::KEY),
    (School::LABEL, School::KEY),
    ("IdSequence", "label"),
];

#[derive(FromContext, Clone)]
pub struct SchemaRepository {
    graph: Graph,
}

impl SchemaRepository {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    /// Creates the identifier uniqueness constraints. Safe to run repeatedly.
    ///
    /// Returns the names of the constraints ensured.
    pub async fn ensure_constraints(&self) -> Result<Vec<String>, AppError> {
        let mut names = Vec::with_capacity(UNIQUE_KEYS.len());
        for (label, key) in UNIQUE_KEYS {
            let name = format!("{}_{}_unique", label.to_lowercase(), key);
            let cypher = format!(
                "CREATE CONSTRAINT {} IF NOT EXISTS FOR (n:{}) REQUIRE n.{} IS UNIQUE",
                name, label, key
            );
            self.graph.query(&cypher).run().await?;
            tracing::info!(constraint = %name, "Ensured uniqueness constraint");
            names.push(name);
        }
        Ok(names)
    }

    /// Round-trips a trivial statement and returns the store's greeting.
    pub async fn ping(&self) -> Result<String, AppError> {
        let row = self
            .graph
            .query("RETURN 'Hello, Neo4j!' AS message")
            .fetch_one()
            .await?
            .ok_or_else(|| AppError::Internal("ping returned no row".to_string()))?;
        row.get("message")
    }
}
