//! Graph store access layer.
//!
//! Repositories talk to the store through one narrow seam:
//!
//! - [`CypherExecutor`] - run a parameterized statement, get records back
//! - [`Query`] - fluent parameter binding on top of it
//! - [`Graph`] - the shared handle every repository holds; adds the retry
//!   policy for transient store failures
//!
//! ```ignore
//! let graph = Graph::new(Arc::new(Neo4jClient::connect(&config.neo4j).await?));
//!
//! let rows = graph
//!     .query("MATCH (b:Book) RETURN properties(b) AS n")
//!     .fetch_all()
//!     .await?;
//! ```

mod macros;
#[doc(hidden)]
pub mod mock;
mod query;
mod row;
mod traits;

pub mod backends;

pub use query::Query;
pub use row::{Params, Properties, Row, RowStream};
pub use traits::CypherExecutor;

#[doc(inline)]
pub use crate::cypher;

use std::sync::Arc;

use crate::error::AppError;

/// Default number of retries after a transient store failure.
pub const DEFAULT_RETRIES: u32 = 1;

/// Shared, cheap-to-clone handle over any [`CypherExecutor`].
///
/// Statements failing with [`AppError::StoreUnavailable`] are re-issued up to
/// `retries` times before the error is surfaced. Nothing else is retried.
#[derive(Clone)]
pub struct Graph {
    executor: Arc<dyn CypherExecutor>,
    retries: u32,
}

impl Graph {
    /// Wraps an executor with the default retry policy.
    pub fn new(executor: Arc<dyn CypherExecutor>) -> Self {
        Self {
            executor,
            retries: DEFAULT_RETRIES,
        }
    }

    /// Sets how many times a transient failure is retried.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Creates a query builder for a direct (auto-commit) statement.
    pub fn query(&self, cypher: &str) -> Query<'_, Self> {
        Query::new(self, cypher)
    }
}

#[async_trait::async_trait]
impl CypherExecutor for Graph {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        let mut attempt = 0;
        loop {
            match self.executor.execute_cypher(cypher, params.clone()).await {
                Err(err) if err.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    tracing::warn!(attempt, error = %err, "Transient store failure, retrying");
                }
                result => return result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::ScriptedExecutor;
    use super::*;
    use serde_json::json;

    fn graph(executor: &Arc<ScriptedExecutor>) -> Graph {
        Graph::new(executor.clone())
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried_once() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor
            .push_error(AppError::StoreUnavailable("connection reset".into()))
            .push_row(Row::from_pairs([("message", json!("ok"))]));

        let row = graph(&executor)
            .query("RETURN 'ok' AS message")
            .fetch_one()
            .await
            .unwrap()
            .unwrap();

        assert_eq!(row.get::<String>("message").unwrap(), "ok");
        assert_eq!(executor.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_transient_failure_surfaces_after_retries() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor
            .push_error(AppError::StoreUnavailable("down".into()))
            .push_error(AppError::StoreUnavailable("still down".into()));

        let result = graph(&executor).query("RETURN 1 AS one").fetch_all().await;

        assert!(matches!(result, Err(AppError::StoreUnavailable(msg)) if msg == "still down"));
        assert_eq!(executor.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_query_errors_are_not_retried() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.push_error(AppError::Query {
            message: "syntax".into(),
            query: "RETRUN 1".into(),
        });

        let result = graph(&executor).query("RETRUN 1").fetch_all().await;

        assert!(matches!(result, Err(AppError::Query { .. })));
        assert_eq!(executor.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_zero_retries_fails_fast() {
        let executor = Arc::new(ScriptedExecutor::new());
        executor.push_error(AppError::StoreUnavailable("down".into()));

        let result = graph(&executor)
            .with_retries(0)
            .query("RETURN 1 AS one")
            .run()
            .await;

        assert!(result.is_err());
        assert_eq!(executor.calls().len(), 1);
    }
}
