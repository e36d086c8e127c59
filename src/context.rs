//! Application context providing dependency injection root.

use std::sync::Arc;

use crate::config::Config;
use crate::di::Context as ContextDerive;
use crate::error::AppError;
use crate::graph::backends::neo4j::Neo4jClient;
use crate::graph::Graph;
use crate::repositories::IdAllocator;

/// Root application context for dependency injection.
///
/// `#[derive(Context)]` makes every field resolvable via `FromRef`, so
/// repositories deriving `FromContext` can be built straight from it.
#[derive(ContextDerive, Clone)]
pub struct Context {
    /// Store handle with the configured retry policy.
    pub graph: Graph,
    /// Shared identifier allocator (owns the per-label locks).
    pub allocator: IdAllocator,
    pub config: Arc<Config>,
}

impl Context {
    /// Creates a context over an existing store handle.
    pub fn new(graph: Graph, config: Config) -> Self {
        Self {
            graph,
            allocator: IdAllocator::new(config.store.id_strategy),
            config: Arc::new(config),
        }
    }

    /// Connects to Neo4j as described by `config`.
    pub async fn connect(config: Config) -> Result<Self, AppError> {
        tracing::info!(uri = %config.neo4j.uri, "Connecting to Neo4j");
        let client = Neo4jClient::connect(&config.neo4j).await?;
        let graph = Graph::new(Arc::new(client)).with_retries(config.store.retries);
        Ok(Self::new(graph, config))
    }
}
