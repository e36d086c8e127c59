//! Generic CRUD repository over one entity label.

use std::marker::PhantomData;

use serde_json::Value as JsonValue;

use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::{Graph, Properties, Row};
use crate::models::{to_properties, Allocation, EntitySchema, KeyValue, Patch};
use crate::repositories::allocator::IdAllocator;

/// CRUD for every node labeled `S::LABEL`, keyed by `S::KEY`.
///
/// Statements are built from the schema constants; caller data only ever
/// travels as parameters.
#[derive(FromContext, Clone)]
pub struct EntityRepository<S: EntitySchema> {
    graph: Graph,
    allocator: IdAllocator,
    #[from_context(default)]
    schema: PhantomData<S>,
}

impl<S: EntitySchema> EntityRepository<S> {
    pub fn new(graph: Graph, allocator: IdAllocator) -> Self {
        Self {
            graph,
            allocator,
            schema: PhantomData,
        }
    }

    /// Creates a node and returns the stored record.
    ///
    /// Upsert entities merge on the supplied key and overwrite the other
    /// fields; checked entities fail with `AlreadyExists` when the key is
    /// taken; sequential entities get the next identifier from the allocator.
    pub async fn create(&self, draft: S::Draft) -> Result<S, AppError> {
        let mut props = to_properties(&draft)?;
        match S::ALLOCATION {
            Allocation::Upsert => {
                let key = Self::supplied_key(&mut props)?;
                self.upsert(&key, props).await
            }
            Allocation::Checked => {
                let key = Self::supplied_key(&mut props)?;
                if self.find(&key).await?.is_some() {
                    return Err(Self::already_exists(&key));
                }
                props.insert(S::KEY.to_string(), key.to_json());
                self.insert(props).await.map_err(|err| match err {
                    AppError::ConstraintViolation(_) => Self::already_exists(&key),
                    other => other,
                })
            }
            Allocation::Sequential => {
                props.remove(S::KEY);
                let reservation = self.allocator.reserve::<S>(&self.graph).await?;
                let key = reservation.key().clone();
                props.insert(S::KEY.to_string(), key.to_json());
                let created = self.insert(props).await.map_err(|err| match err {
                    AppError::ConstraintViolation(_) => AppError::RaceCondition {
                        label: S::LABEL,
                        id: key.to_string(),
                    },
                    other => other,
                });
                drop(reservation);
                created
            }
        }
    }

    /// Returns the record with the given key, or `NotFound`.
    pub async fn get(&self, key: &KeyValue) -> Result<S, AppError> {
        self.find(key)
            .await?
            .ok_or_else(|| Self::not_found(key))
    }

    /// Writes exactly the fields present in `patch`.
    ///
    /// An empty patch reads the record unchanged.
    pub async fn update(&self, key: &KeyValue, patch: &S::Patch) -> Result<S, AppError> {
        let patch = Patch::from_update(patch, S::KEY)?;
        if patch.is_empty() {
            return self.get(key).await;
        }

        let cypher = format!(
            "MATCH (n:{} {{{}: $key}}) SET n += $patch RETURN properties(n) AS n",
            S::LABEL,
            S::KEY
        );
        let row = self
            .graph
            .query(&cypher)
            .param("key", key)
            .param_raw("patch", JsonValue::Object(patch.into_properties()))
            .fetch_one()
            .await?;

        match row {
            Some(row) => Self::record(row),
            None => Err(Self::not_found(key)),
        }
    }

    /// Deletes the node and its attached edges. `true` iff a node was deleted.
    pub async fn delete(&self, key: &KeyValue) -> Result<bool, AppError> {
        let cypher = format!(
            "MATCH (n:{} {{{}: $key}}) DETACH DELETE n RETURN count(n) AS deleted",
            S::LABEL,
            S::KEY
        );
        let row = self.graph.query(&cypher).param("key", key).fetch_one().await?;
        let deleted = match row {
            Some(row) => row.get_opt::<i64>("deleted")?.unwrap_or(0),
            None => 0,
        };

        tracing::debug!(label = S::LABEL, id = %key, deleted, "Deleted node");
        Ok(deleted > 0)
    }

    /// Every node under the label that carries an identifier.
    pub async fn list(&self) -> Result<Vec<S>, AppError> {
        let cypher = format!(
            "MATCH (n:{label}) WHERE n.{key} IS NOT NULL RETURN properties(n) AS n ORDER BY n.{key}",
            label = S::LABEL,
            key = S::KEY
        );
        let rows = self.graph.query(&cypher).fetch_all().await?;
        rows.into_iter().map(Self::record).collect()
    }

    async fn find(&self, key: &KeyValue) -> Result<Option<S>, AppError> {
        let cypher = format!(
            "MATCH (n:{} {{{}: $key}}) RETURN properties(n) AS n",
            S::LABEL,
            S::KEY
        );
        let row = self.graph.query(&cypher).param("key", key).fetch_one().await?;
        row.map(Self::record).transpose()
    }

    async fn upsert(&self, key: &KeyValue, props: Properties) -> Result<S, AppError> {
        let cypher = format!(
            "MERGE (n:{} {{{}: $key}}) SET n += $props RETURN properties(n) AS n",
            S::LABEL,
            S::KEY
        );
        let row = self
            .graph
            .query(&cypher)
            .param("key", key)
            .param_raw("props", JsonValue::Object(props))
            .fetch_one()
            .await
            .map_err(|err| match err {
                AppError::ConstraintViolation(_) => Self::already_exists(key),
                other => other,
            })?;
        Self::written(row)
    }

    async fn insert(&self, props: Properties) -> Result<S, AppError> {
        let cypher = format!("CREATE (n:{} $props) RETURN properties(n) AS n", S::LABEL);
        let row = self
            .graph
            .query(&cypher)
            .param_raw("props", JsonValue::Object(props))
            .fetch_one()
            .await?;
        Self::written(row)
    }

    /// Removes the caller-supplied key from `props`, in stored form.
    fn supplied_key(props: &mut Properties) -> Result<KeyValue, AppError> {
        let key = props
            .remove(S::KEY)
            .and_then(|value| S::KEY_TYPE.from_json(&value))
            .filter(|key| !matches!(key, KeyValue::Text(text) if text.is_empty()));
        key.ok_or_else(|| {
            AppError::Validation(format!("{} requires a valid '{}'", S::LABEL, S::KEY))
        })
    }

    fn written(row: Option<Row>) -> Result<S, AppError> {
        let row = row.ok_or_else(|| {
            AppError::Internal(format!("write to {} returned no node", S::LABEL))
        })?;
        Self::record(row)
    }

    fn record(mut row: Row) -> Result<S, AppError> {
        let props: Properties = row.take("n")?;
        S::from_properties(props)
    }

    fn not_found(key: &KeyValue) -> AppError {
        AppError::NotFound {
            label: S::LABEL,
            id: key.to_string(),
        }
    }

    fn already_exists(key: &KeyValue) -> AppError {
        AppError::AlreadyExists {
            label: S::LABEL,
            id: key.to_string(),
        }
    }
}
