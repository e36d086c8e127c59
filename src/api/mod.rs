//! REST surface.
//!
//! Handlers resolve repositories from the shared [`Context`] per request;
//! failures render through `IntoResponse for AppError` as
//! `{"code", "detail"}` with a matching status.

mod entities;
mod error;
mod extract;
mod links;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value as JsonValue};

use crate::context::Context;
use crate::models::{
    AffiliatedWith, Author, Book, Company, Relationship, School, User, WrittenBy,
};

/// Builds the full application router over `ctx`.
pub fn build_router(ctx: Context) -> Router {
    Router::new()
        .route("/", get(banner))
        .merge(entities::routes::<Company>("/companies"))
        .merge(entities::routes::<User>("/users"))
        .merge(entities::routes::<Author>("/authors"))
        .merge(entities::routes::<Book>("/books"))
        .merge(entities::routes::<School>("/schools"))
        .nest(WrittenBy::ROUTE, links::routes::<WrittenBy>())
        .nest(AffiliatedWith::ROUTE, links::routes::<AffiliatedWith>())
        .with_state(ctx)
}

async fn banner() -> Json<JsonValue> {
    Json(json!({
        "message": "Bookgraph",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "API for managing companies, users, authors, books and schools in a Neo4j graph",
    }))
}
