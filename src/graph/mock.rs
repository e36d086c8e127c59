//! Scripted executor for tests.
//!
//! Responses are replayed in the order they were pushed; once the script is
//! exhausted every statement yields zero rows. Every statement is recorded.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::graph::row::{Params, Row, RowStream};
use crate::graph::traits::CypherExecutor;

#[derive(Default)]
pub struct ScriptedExecutor {
    script: Mutex<VecDeque<Result<Vec<Row>, AppError>>>,
    calls: Mutex<Vec<(String, Params)>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rows(&self, rows: Vec<Row>) -> &Self {
        locked(&self.script).push_back(Ok(rows));
        self
    }

    pub fn push_row(&self, row: Row) -> &Self {
        self.push_rows(vec![row])
    }

    /// One row holding a node's properties under `n`.
    pub fn push_node(&self, props: JsonValue) -> &Self {
        self.push_row(Row::from_pairs([("n", props)]))
    }

    pub fn push_empty(&self) -> &Self {
        self.push_rows(Vec::new())
    }

    pub fn push_error(&self, err: AppError) -> &Self {
        locked(&self.script).push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<(String, Params)> {
        locked(&self.calls).clone()
    }
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl CypherExecutor for ScriptedExecutor {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        locked(&self.calls).push((cypher.to_string(), params));
        let rows = locked(&self.script)
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))?;
        Ok(Box::pin(futures::stream::iter(rows.into_iter().map(Ok))))
    }
}
