//! Natural-key edge creation and one-hop traversal.

use std::marker::PhantomData;

use crate::context::Context;
use crate::cypher;
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::Graph;
use crate::models::{EntitySchema, Link, Neighbors, Relationship};

/// Links and traverses one edge type, addressing nodes by natural key.
///
/// Nodes are re-resolved by key on every call. Linking creates bare
/// endpoint nodes when none match; those carry no identifier and do not
/// show up in entity listings.
#[derive(FromContext, Clone)]
pub struct RelationshipLinker<R: Relationship> {
    graph: Graph,
    #[from_context(default)]
    relationship: PhantomData<R>,
}

impl<R: Relationship> RelationshipLinker<R> {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            relationship: PhantomData,
        }
    }

    /// Ensures both endpoints and exactly one edge between them exist.
    pub async fn link(&self, source: &str, target: &str) -> Result<Link, AppError> {
        require(R::SOURCE_FIELD, source)?;
        require(R::TARGET_FIELD, target)?;

        let cypher = format!(
            "MERGE (s:{source_label} {{{source_key}: $source}})
             MERGE (t:{target_label} {{{target_key}: $target}})
             MERGE (s)-[:{edge}]->(t)
             RETURN s.{source_key} AS source, t.{target_key} AS target",
            source_label = R::Source::LABEL,
            source_key = R::SOURCE_KEY,
            target_label = R::Target::LABEL,
            target_key = R::TARGET_KEY,
            edge = R::EDGE,
        );
        cypher!(self.graph, &cypher, source = source, target = target)
            .run()
            .await?;

        tracing::debug!(edge = R::EDGE, source, target, "Linked");
        Ok(Link {
            source: source.to_string(),
            target: target.to_string(),
        })
    }

    /// Keys of every target the source points at. Empty if the source is absent.
    pub async fn targets_of(&self, source: &str) -> Result<Neighbors, AppError> {
        let cypher = format!(
            "MATCH (s:{source_label} {{{source_key}: $anchor}})-[:{edge}]->(t:{target_label})
             RETURN collect(DISTINCT t.{target_key}) AS related",
            source_label = R::Source::LABEL,
            source_key = R::SOURCE_KEY,
            target_label = R::Target::LABEL,
            target_key = R::TARGET_KEY,
            edge = R::EDGE,
        );
        self.neighbors(&cypher, source).await
    }

    /// Keys of every source pointing at the target. Empty if the target is absent.
    pub async fn sources_of(&self, target: &str) -> Result<Neighbors, AppError> {
        let cypher = format!(
            "MATCH (s:{source_label})-[:{edge}]->(t:{target_label} {{{target_key}: $anchor}})
             RETURN collect(DISTINCT s.{source_key}) AS related",
            source_label = R::Source::LABEL,
            source_key = R::SOURCE_KEY,
            target_label = R::Target::LABEL,
            target_key = R::TARGET_KEY,
            edge = R::EDGE,
        );
        self.neighbors(&cypher, target).await
    }

    async fn neighbors(&self, cypher: &str, anchor: &str) -> Result<Neighbors, AppError> {
        let row = self
            .graph
            .query(cypher)
            .param("anchor", anchor)
            .fetch_one()
            .await?;
        let related = match row {
            Some(row) => row.get_opt::<Vec<String>>("related")?.unwrap_or_default(),
            None => Vec::new(),
        };
        Ok(Neighbors {
            anchor: anchor.to_string(),
            related,
        })
    }
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("'{}' must not be empty", field)));
    }
    Ok(())
}
