//! Shared fixtures: a server over a scripted store, bound to a random port.

#![allow(dead_code)]

use std::sync::Arc;

use bookgraph::api::build_router;
use bookgraph::config::Config;
use bookgraph::context::Context;
use bookgraph::graph::mock::ScriptedExecutor;
use bookgraph::graph::{Graph, Row};
use serde_json::Value as JsonValue;

pub fn scripted_store() -> Arc<ScriptedExecutor> {
    Arc::new(ScriptedExecutor::new())
}

pub fn row(pairs: &[(&str, JsonValue)]) -> Row {
    Row::from_pairs(pairs.iter().map(|(k, v)| (k.to_string(), v.clone())))
}

/// Serves the full router over `store`; returns the base URL.
pub async fn spawn(store: Arc<ScriptedExecutor>) -> String {
    let ctx = Context::new(Graph::new(store), Config::default());
    let app = build_router(ctx);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
