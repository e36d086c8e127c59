//! Core trait for the graph store collaborator.

use async_trait::async_trait;

use crate::error::AppError;
use crate::graph::row::{Params, RowStream};

/// Executes Cypher statements against a graph database.
///
/// This is the only boundary between the repositories and the store: a
/// parameterized statement goes in, a sequence of records comes out. Each
/// record maps a field alias to a scalar, a list or a property map.
#[async_trait]
pub trait CypherExecutor: Send + Sync {
    /// Executes a Cypher statement and returns a stream of result rows.
    ///
    /// Use this for statements that return data (MATCH, RETURN).
    async fn execute_cypher(&self, cypher: &str, params: Params)
        -> Result<RowStream<'_>, AppError>;

    /// Executes a Cypher statement and discards any results.
    ///
    /// Use this for mutations and DDL that return nothing of interest.
    async fn run_cypher(&self, cypher: &str, params: Params) -> Result<(), AppError> {
        use futures::StreamExt;
        let mut stream = self.execute_cypher(cypher, params).await?;
        // Drain the stream to ensure the statement completes
        while let Some(result) = stream.next().await {
            result?;
        }
        Ok(())
    }
}
