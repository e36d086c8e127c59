//! Query builder for fluent Cypher statement construction.

use futures::{StreamExt, TryStreamExt};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::graph::row::{Params, Row, RowStream};
use crate::graph::traits::CypherExecutor;

/// A builder for constructing and executing Cypher statements.
///
/// ```ignore
/// let row = graph
///     .query("MATCH (b:Book {id: $id}) RETURN properties(b) AS n")
///     .param("id", 3)
///     .fetch_one()
///     .await?;
/// ```
pub struct Query<'a, E: CypherExecutor + ?Sized> {
    executor: &'a E,
    cypher: String,
    params: Params,
    error: Option<AppError>,
}

impl<'a, E: CypherExecutor + ?Sized> Query<'a, E> {
    pub fn new(executor: &'a E, cypher: &str) -> Self {
        Self {
            executor,
            cypher: cypher.to_string(),
            params: Params::new(),
            error: None,
        }
    }

    /// Adds a parameter, referenced in Cypher as `$name`.
    ///
    /// A value that fails to serialize is reported when the query executes.
    pub fn param<T: Serialize>(mut self, name: &str, value: T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => {
                self.params.insert(name.to_string(), json);
            }
            Err(e) => {
                self.error.get_or_insert_with(|| {
                    AppError::Internal(format!("failed to serialize parameter '{}': {}", name, e))
                });
            }
        }
        self
    }

    /// Adds a parameter that's already a JSON value.
    pub fn param_raw(mut self, name: &str, value: JsonValue) -> Self {
        self.params.insert(name.to_string(), value);
        self
    }

    /// Executes the query and returns a stream of rows.
    pub async fn execute(self) -> Result<RowStream<'a>, AppError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.executor
            .execute_cypher(&self.cypher, self.params)
            .await
    }

    /// Executes the query and collects all rows into a vector.
    pub async fn fetch_all(self) -> Result<Vec<Row>, AppError> {
        self.execute().await?.try_collect().await
    }

    /// Executes the query and returns the first row, if any.
    pub async fn fetch_one(self) -> Result<Option<Row>, AppError> {
        let mut stream = self.execute().await?;
        stream.next().await.transpose()
    }

    /// Executes the query without returning results.
    pub async fn run(self) -> Result<(), AppError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.executor.run_cypher(&self.cypher, self.params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::mock::ScriptedExecutor;
    use crate::graph::Graph;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn scripted() -> (Arc<ScriptedExecutor>, Graph) {
        let executor = Arc::new(ScriptedExecutor::new());
        let graph = Graph::new(executor.clone());
        (executor, graph)
    }

    #[tokio::test]
    async fn test_query_no_params() {
        let (executor, graph) = scripted();

        let rows = graph.query("MATCH (n:Book) RETURN n").fetch_all().await;
        assert!(rows.unwrap().is_empty());

        let calls = executor.calls();
        assert_eq!(calls[0].0, "MATCH (n:Book) RETURN n");
        assert!(calls[0].1.is_empty());
    }

    #[tokio::test]
    async fn test_query_with_params() {
        let (executor, graph) = scripted();

        graph
            .query("MATCH (b:Book {id: $id}) SET b += $patch RETURN b")
            .param("id", 7)
            .param("patch", json!({"title": "Emma"}))
            .fetch_all()
            .await
            .unwrap();

        let mut expected = HashMap::new();
        expected.insert("id".to_string(), json!(7));
        expected.insert("patch".to_string(), json!({"title": "Emma"}));
        assert_eq!(executor.calls()[0].1, expected);
    }

    #[tokio::test]
    async fn test_fetch_one_returns_first_row() {
        let (executor, graph) = scripted();
        executor.push_rows(vec![
            Row::from_pairs([("max_id", json!(3))]),
            Row::from_pairs([("max_id", json!(9))]),
        ]);

        let row = graph
            .query("MATCH (s:School) RETURN max(s.id) AS max_id")
            .fetch_one()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.get::<i64>("max_id").unwrap(), 3);
    }

    #[tokio::test]
    async fn test_unserializable_param_fails_at_execution() {
        struct Broken;
        impl Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("nope"))
            }
        }

        let (executor, graph) = scripted();
        let result = graph
            .query("CREATE (n:Book {id: $id})")
            .param("id", Broken)
            .run()
            .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
        assert!(executor.calls().is_empty());
    }
}
