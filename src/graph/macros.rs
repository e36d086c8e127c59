//! Shorthand for parameterized Cypher statements.

/// Builds a [`Query`](crate::graph::Query) with named parameters.
///
/// ```ignore
/// let rows = cypher!(
///     graph,
///     "MATCH (a:Author {name: $name})<-[:WRITTEN_BY]-(b:Book) RETURN b.title AS title",
///     name = author_name,
/// )
/// .fetch_all()
/// .await?;
/// ```
#[macro_export]
macro_rules! cypher {
    ($graph:expr, $query:expr) => {
        $graph.query($query)
    };
    ($graph:expr, $query:expr, $($name:ident = $value:expr),+ $(,)?) => {
        $graph.query($query)$(.param(stringify!($name), $value))+
    };
}

#[cfg(test)]
mod tests {
    use crate::graph::mock::ScriptedExecutor;
    use crate::graph::Graph;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_cypher_macro_no_params() {
        let executor = Arc::new(ScriptedExecutor::new());
        let graph = Graph::new(executor.clone());
        cypher!(graph, "MATCH (c:Company) RETURN c")
            .run()
            .await
            .unwrap();

        assert!(executor.calls()[0].1.is_empty());
    }

    #[tokio::test]
    async fn test_cypher_macro_names_params_after_idents() {
        let executor = Arc::new(ScriptedExecutor::new());
        let graph = Graph::new(executor.clone());
        let source = "Dune";
        let target = "Frank Herbert";
        cypher!(
            graph,
            "MERGE (b:Book {title: $source}) MERGE (a:Author {name: $target})",
            source = source,
            target = target,
        )
        .run()
        .await
        .unwrap();

        let params = &executor.calls()[0].1;
        assert_eq!(params["source"], json!("Dune"));
        assert_eq!(params["target"], json!("Frank Herbert"));
    }
}
