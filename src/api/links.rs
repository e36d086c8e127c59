//! Link and traversal routes, one router per edge type.
//!
//! For `WrittenBy` under `/book2author`:
//!
//! - `POST /create {"book_title", "author_name"}` -> `{"book", "author"}`
//! - `GET /book/:title` -> `{"book", "authors"}`
//! - `GET /author/:name` -> `{"author", "books"}`

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value as JsonValue};

use super::extract::{Body, Key};
use crate::context::Context;
use crate::di::FromRef;
use crate::error::AppError;
use crate::models::Relationship;
use crate::repositories::RelationshipLinker;

pub fn routes<R: Relationship>() -> Router<Context> {
    Router::new()
        .route("/create", post(link::<R>))
        .route(&format!("/{}/:key", R::SOURCE_NAME), get(targets::<R>))
        .route(&format!("/{}/:key", R::TARGET_NAME), get(sources::<R>))
}

async fn link<R: Relationship>(
    State(ctx): State<Context>,
    Body(body): Body<Map<String, JsonValue>>,
) -> Result<Json<JsonValue>, AppError> {
    let source = text_field(&body, R::SOURCE_FIELD)?;
    let target = text_field(&body, R::TARGET_FIELD)?;

    let link = RelationshipLinker::<R>::from_ref(&ctx)
        .link(source, target)
        .await?;
    Ok(pair(R::SOURCE_NAME, link.source, R::TARGET_NAME, link.target))
}

async fn targets<R: Relationship>(
    State(ctx): State<Context>,
    Key(key): Key<String>,
) -> Result<Json<JsonValue>, AppError> {
    let neighbors = RelationshipLinker::<R>::from_ref(&ctx)
        .targets_of(&key)
        .await?;
    Ok(pair(
        R::SOURCE_NAME,
        neighbors.anchor,
        R::TARGET_PLURAL,
        neighbors.related,
    ))
}

async fn sources<R: Relationship>(
    State(ctx): State<Context>,
    Key(key): Key<String>,
) -> Result<Json<JsonValue>, AppError> {
    let neighbors = RelationshipLinker::<R>::from_ref(&ctx)
        .sources_of(&key)
        .await?;
    Ok(pair(
        R::TARGET_NAME,
        neighbors.anchor,
        R::SOURCE_PLURAL,
        neighbors.related,
    ))
}

fn text_field<'a>(body: &'a Map<String, JsonValue>, field: &str) -> Result<&'a str, AppError> {
    body.get(field)
        .and_then(JsonValue::as_str)
        .ok_or_else(|| AppError::Validation(format!("'{}' is required and must be a string", field)))
}

fn pair(
    first: &str,
    first_value: impl Into<JsonValue>,
    second: &str,
    second_value: impl Into<JsonValue>,
) -> Json<JsonValue> {
    let mut body = Map::new();
    body.insert(first.to_string(), first_value.into());
    body.insert(second.to_string(), second_value.into());
    Json(JsonValue::Object(body))
}
