//! HTTP request handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

use crate::api::models::HealthResponse;
use crate::api::routes::RESOURCES;
use crate::api::serializers::Resource;
use crate::error::{AppError, Result};
use crate::AppState;

/// Path ids that are not integers cannot name a record
fn parse_id<R: Resource>(raw: &str) -> Result<i64> {
    raw.trim().parse().map_err(|_| AppError::NotFound {
        entity: R::ENTITY,
        id: raw.to_string(),
    })
}

/// List every record of a resource
pub async fn list<R: Resource>(State(state): State<Arc<AppState>>) -> Result<Json<Vec<R::Read>>> {
    let items = R::list(state.store.as_ref()).await?;
    Ok(Json(items))
}

/// Retrieve one record by id
pub async fn retrieve<R: Resource>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<R::Read>> {
    let id = parse_id::<R>(&id)?;
    let item = R::retrieve(state.store.as_ref(), id).await?;
    Ok(Json(item))
}

/// Create a record
pub async fn create<R: Resource>(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<R::Write>, JsonRejection>,
) -> Result<(StatusCode, Json<R::Read>)> {
    let Json(payload) = payload?;
    let item = R::create(state.store.as_ref(), payload).await?;
    info!(entity = R::ENTITY, "Created record");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Replace a record (PUT)
pub async fn update<R: Resource>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<R::Write>, JsonRejection>,
) -> Result<Json<R::Read>> {
    write::<R>(state, id, payload, false).await
}

/// Update the supplied fields of a record (PATCH)
pub async fn partial_update<R: Resource>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<R::Write>, JsonRejection>,
) -> Result<Json<R::Read>> {
    write::<R>(state, id, payload, true).await
}

async fn write<R: Resource>(
    state: Arc<AppState>,
    id: String,
    payload: std::result::Result<Json<R::Write>, JsonRejection>,
    partial: bool,
) -> Result<Json<R::Read>> {
    let id = parse_id::<R>(&id)?;
    let Json(payload) = payload?;
    let item = R::update(state.store.as_ref(), id, payload, partial).await?;
    info!(entity = R::ENTITY, id, partial, "Updated record");
    Ok(Json(item))
}

/// Delete a record
pub async fn destroy<R: Resource>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id::<R>(&id)?;
    R::destroy(state.store.as_ref(), id).await?;
    info!(entity = R::ENTITY, id, "Deleted record");
    Ok(StatusCode::NO_CONTENT)
}

/// API root: one link per registered resource
pub async fn api_root() -> Json<Value> {
    let links: Map<String, Value> = RESOURCES
        .iter()
        .map(|(prefix, _)| {
            (
                prefix.trim_start_matches('/').to_string(),
                Value::String(prefix.to_string()),
            )
        })
        .collect();
    Json(Value::Object(links))
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (categories, products) = state.store.counts().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        categories,
        products,
    })
}
