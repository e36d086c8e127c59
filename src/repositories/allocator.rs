//! Server-assigned identifier allocation for sequential entities.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::OwnedMutexGuard;

use crate::error::AppError;
use crate::graph::Graph;
use crate::models::{EntitySchema, KeyValue};

/// How the next identifier for a label is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// `max + 1` read in its own statement. Concurrent creates can collide.
    Scan,
    /// `Scan`, serialized per label inside this process until the create lands.
    Locked,
    /// Store-side counter node per label, incremented under a write lock.
    #[default]
    Sequence,
}

/// An identifier handed out by [`IdAllocator::reserve`].
///
/// Under [`IdStrategy::Locked`] the per-label lock is released when the
/// reservation is dropped, so keep it alive until the node is created.
pub struct Reservation {
    key: KeyValue,
    _guard: Option<OwnedMutexGuard<()>>,
}

impl Reservation {
    pub fn key(&self) -> &KeyValue {
        &self.key
    }
}

#[derive(Clone, Default)]
pub struct IdAllocator {
    strategy: IdStrategy,
    locks: Arc<Mutex<HashMap<&'static str, Arc<tokio::sync::Mutex<()>>>>>,
}

impl IdAllocator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            locks: Arc::default(),
        }
    }

    /// Picks the next identifier for `S`.
    pub async fn reserve<S: EntitySchema>(&self, graph: &Graph) -> Result<Reservation, AppError> {
        let (next, guard) = match self.strategy {
            IdStrategy::Scan => (Self::scan_max::<S>(graph).await? + 1, None),
            IdStrategy::Locked => {
                let guard = self.lock_for(S::LABEL).lock_owned().await;
                (Self::scan_max::<S>(graph).await? + 1, Some(guard))
            }
            IdStrategy::Sequence => (Self::next_in_sequence::<S>(graph).await?, None),
        };

        tracing::debug!(label = S::LABEL, id = next, strategy = ?self.strategy, "Reserved identifier");
        Ok(Reservation {
            key: S::KEY_TYPE.from_sequence(next),
            _guard: guard,
        })
    }

    fn lock_for(&self, label: &'static str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(label).or_default().clone()
    }

    async fn scan_max<S: EntitySchema>(graph: &Graph) -> Result<i64, AppError> {
        let cypher = format!(
            "MATCH (n:{}) RETURN coalesce(max({}), 0) AS max_id",
            S::LABEL,
            S::KEY_TYPE.numeric_expr("n", S::KEY)
        );
        let row = graph.query(&cypher).fetch_one().await?;
        match row {
            Some(row) => Ok(row.get_opt::<i64>("max_id")?.unwrap_or(0)),
            None => Ok(0),
        }
    }

    async fn next_in_sequence<S: EntitySchema>(graph: &Graph) -> Result<i64, AppError> {
        // The counter never drops below the nodes already stored, so writes
        // made outside the sequence are not handed out again.
        let cypher = format!(
            "OPTIONAL MATCH (n:{label})
             WITH coalesce(max({expr}), 0) AS floor
             MERGE (s:IdSequence {{label: $label}})
             ON CREATE SET s.value = floor
             SET s._lock = true
             WITH s, floor
             SET s.value = CASE WHEN floor > s.value THEN floor ELSE s.value END + 1
             REMOVE s._lock
             RETURN s.value AS next_id",
            label = S::LABEL,
            expr = S::KEY_TYPE.numeric_expr("n", S::KEY),
        );
        let row = graph
            .query(&cypher)
            .param("label", S::LABEL)
            .fetch_one()
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("identifier sequence for {} returned no row", S::LABEL))
            })?;
        row.get("next_id")
    }
}
