use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use models::category;
use service::catalog::categories;

use super::{OkResponse, ServerState};
use crate::errors::JsonApiError;

#[derive(Debug, Deserialize)]
pub struct CategoryInput {
    pub name: String,
}

#[utoipa::path(get, path = "/api/categories", tag = "categories", responses((status = 200, description = "All categories")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<category::Model>>, JsonApiError> {
    Ok(Json(categories::list(&state.db).await?))
}

#[utoipa::path(
    post, path = "/api/categories", tag = "categories",
    request_body = crate::openapi::CategoryInputDoc,
    responses((status = 200, description = "Created"), (status = 400, description = "Validation Error"), (status = 409, description = "Name taken"))
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<CategoryInput>) -> Result<Json<category::Model>, JsonApiError> {
    Ok(Json(categories::create(&state.db, &input.name).await?))
}

#[utoipa::path(
    get, path = "/api/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses((status = 200, description = "Category"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<category::Model>, JsonApiError> {
    Ok(Json(categories::get(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/api/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    request_body = crate::openapi::CategoryInputDoc,
    responses((status = 200, description = "Renamed"), (status = 404, description = "Not Found"), (status = 409, description = "Name taken"))
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<CategoryInput>,
) -> Result<Json<category::Model>, JsonApiError> {
    Ok(Json(categories::update(&state.db, id, &input.name).await?))
}

#[utoipa::path(
    delete, path = "/api/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"), (status = 409, description = "Category still has products"))
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<OkResponse>, JsonApiError> {
    categories::delete(&state.db, id).await?;
    Ok(OkResponse::ok())
}
