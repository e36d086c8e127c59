//! CRUD routes, one router per entity type.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value as JsonValue};

use super::extract::{Body, Key};
use crate::context::Context;
use crate::di::FromRef;
use crate::error::AppError;
use crate::models::EntitySchema;
use crate::repositories::EntityRepository;

/// `POST`/`GET` on `base` (with or without a trailing slash), plus
/// `GET`/`PUT`/`DELETE` on `base/:id`.
pub fn routes<S: EntitySchema>(base: &str) -> Router<Context> {
    Router::new()
        .route(base, get(list::<S>).post(create::<S>))
        .route(&format!("{}/", base), get(list::<S>).post(create::<S>))
        .route(
            &format!("{}/:id", base),
            get(fetch::<S>).put(update::<S>).delete(remove::<S>),
        )
}

async fn create<S: EntitySchema>(
    State(ctx): State<Context>,
    Body(draft): Body<S::Draft>,
) -> Result<Json<S>, AppError> {
    let record = EntityRepository::<S>::from_ref(&ctx).create(draft).await?;
    Ok(Json(record))
}

async fn list<S: EntitySchema>(State(ctx): State<Context>) -> Result<Json<Vec<S>>, AppError> {
    let records = EntityRepository::<S>::from_ref(&ctx).list().await?;
    Ok(Json(records))
}

async fn fetch<S: EntitySchema>(
    State(ctx): State<Context>,
    Key(id): Key<String>,
) -> Result<Json<S>, AppError> {
    let key = S::KEY_TYPE.parse(&id)?;
    let record = EntityRepository::<S>::from_ref(&ctx).get(&key).await?;
    Ok(Json(record))
}

async fn update<S: EntitySchema>(
    State(ctx): State<Context>,
    Key(id): Key<String>,
    Body(patch): Body<S::Patch>,
) -> Result<Json<S>, AppError> {
    let key = S::KEY_TYPE.parse(&id)?;
    let record = EntityRepository::<S>::from_ref(&ctx)
        .update(&key, &patch)
        .await?;
    Ok(Json(record))
}

async fn remove<S: EntitySchema>(
    State(ctx): State<Context>,
    Key(id): Key<String>,
) -> Result<Json<JsonValue>, AppError> {
    let key = S::KEY_TYPE.parse(&id)?;
    if !EntityRepository::<S>::from_ref(&ctx).delete(&key).await? {
        return Err(AppError::NotFound {
            label: S::LABEL,
            id: key.to_string(),
        });
    }
    Ok(Json(json!({ "message": format!("{} {} deleted", S::LABEL, key) })))
}
