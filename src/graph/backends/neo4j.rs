//! Neo4j backend over the `neo4rs` Bolt driver.
//!
//! ```ignore
//! use bookgraph::graph::backends::neo4j::Neo4jClient;
//! use bookgraph::graph::Graph;
//!
//! let client = Neo4jClient::connect(&config.neo4j).await?;
//! let graph = Graph::new(Arc::new(client));
//! ```
//!
//! Parameters travel as typed Bolt values, never interpolated into the
//! statement text. Result rows come back as JSON maps keyed by alias, so
//! statements return node values as `properties(n)`.

use std::collections::HashMap;

use async_trait::async_trait;
use neo4rs::{
    BoltBoolean, BoltFloat, BoltInteger, BoltList, BoltMap, BoltNull, BoltString, BoltType,
    ConfigBuilder,
};
use serde_json::Value as JsonValue;

use crate::config::Neo4jConfig;
use crate::error::AppError;
use crate::graph::row::{Params, Row, RowStream};
use crate::graph::traits::CypherExecutor;

/// Neo4j graph client.
///
/// Cheap to clone: `neo4rs::Graph` is a handle over a shared connection pool.
#[derive(Clone)]
pub struct Neo4jClient {
    graph: neo4rs::Graph,
}

impl Neo4jClient {
    /// Opens a pooled connection using the `[neo4j]` configuration section.
    pub async fn connect(config: &Neo4jConfig) -> Result<Self, AppError> {
        let mut builder = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_deref().unwrap_or(""))
            .max_connections(config.max_connections);
        if let Some(db) = &config.database {
            builder = builder.db(db.as_str());
        }
        let driver_config = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Invalid Neo4j configuration: {}", e)))?;

        let graph = neo4rs::Graph::connect(driver_config)
            .await
            .map_err(|e| classify_error(e, "<connect>"))?;

        tracing::debug!(uri = %config.uri, "Neo4j connection pool ready");
        Ok(Self { graph })
    }
}

#[async_trait]
impl CypherExecutor for Neo4jClient {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        use async_stream::try_stream;

        let mut query = neo4rs::query(cypher);
        for (name, value) in params {
            query = query.param(&name, to_bolt(value));
        }

        tracing::trace!(cypher, "Executing Cypher");
        let mut rows = self
            .graph
            .execute(query)
            .await
            .map_err(|e| classify_error(e, cypher))?;

        let cypher = cypher.to_string();
        Ok(Box::pin(try_stream! {
            while let Some(row) = rows.next().await.map_err(|e| classify_error(e, &cypher))? {
                yield from_bolt_row(&row)?;
            }
        }))
    }
}

/// Converts a JSON parameter into the equivalent Bolt value.
///
/// Integral numbers stay integers so that identifiers compare equal to the
/// integer properties stored by earlier writes.
pub(crate) fn to_bolt(value: JsonValue) -> BoltType {
    match value {
        JsonValue::Null => BoltType::Null(BoltNull),
        JsonValue::Bool(b) => BoltType::Boolean(BoltBoolean::new(b)),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => BoltType::Integer(BoltInteger::new(i)),
            None => BoltType::Float(BoltFloat::new(n.as_f64().unwrap_or_default())),
        },
        JsonValue::String(s) => BoltType::String(BoltString::new(&s)),
        JsonValue::Array(items) => {
            let mut list = BoltList::with_capacity(items.len());
            for item in items {
                list.push(to_bolt(item));
            }
            BoltType::List(list)
        }
        JsonValue::Object(entries) => {
            let mut map = BoltMap::with_capacity(entries.len());
            for (key, item) in entries {
                map.put(BoltString::new(&key), to_bolt(item));
            }
            BoltType::Map(map)
        }
    }
}

fn from_bolt_row(row: &neo4rs::Row) -> Result<Row, AppError> {
    row.to::<HashMap<String, JsonValue>>()
        .map(Row::new)
        .map_err(|e| AppError::Internal(format!("Failed to decode Neo4j row: {}", e)))
}

/// Maps driver errors onto the application taxonomy.
fn classify_error(err: neo4rs::Error, cypher: &str) -> AppError {
    match err {
        neo4rs::Error::IOError { .. } | neo4rs::Error::ConnectionError => {
            AppError::StoreUnavailable(err.to_string())
        }
        other => classify_message(other.to_string(), cypher),
    }
}

fn classify_message(message: String, cypher: &str) -> AppError {
    if message.contains("ConstraintValidationFailed") || message.contains("already exists with")
    {
        AppError::ConstraintViolation(message)
    } else if message.contains("ServiceUnavailable") || message.contains("TransientError") {
        AppError::StoreUnavailable(message)
    } else {
        AppError::Query {
            message,
            query: cypher.to_string(),
        }
    }
}
