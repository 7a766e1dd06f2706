//! Shared bodies and plumbing for the owned image-list routes.

use axum::Json;
use serde::Serialize;

use service::catalog::{images, DeleteTarget, ImageKind};

use super::ServerState;
use crate::errors::JsonApiError;

#[derive(Debug, Serialize)]
pub struct AppendResponse {
    pub ok: bool,
    pub inserted: usize,
    pub skipped: usize,
}

#[derive(Debug, Serialize)]
pub struct ReplaceResponse {
    pub ok: bool,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
    pub deleted: u64,
}

pub async fn append(state: &ServerState, kind: ImageKind, id: i32, urls: Vec<String>) -> Result<Json<AppendResponse>, JsonApiError> {
    let out = images::append(&state.db, kind, id, &urls).await?;
    Ok(Json(AppendResponse { ok: true, inserted: out.inserted, skipped: out.skipped }))
}

pub async fn replace(state: &ServerState, kind: ImageKind, id: i32, urls: Vec<String>) -> Result<Json<ReplaceResponse>, JsonApiError> {
    let count = images::replace(&state.db, kind, id, &urls).await?;
    Ok(Json(ReplaceResponse { ok: true, count }))
}

pub async fn remove(state: &ServerState, kind: ImageKind, id: i32, target: DeleteTarget) -> Result<Json<DeleteResponse>, JsonApiError> {
    let deleted = images::remove(&state.db, kind, id, &target).await?;
    Ok(Json(DeleteResponse { ok: true, deleted }))
}
