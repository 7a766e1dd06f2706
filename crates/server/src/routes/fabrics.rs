use axum::{
    extract::{Path, State},
    Json,
};

use service::catalog::{
    fabrics::{self, FabricInput, FabricUpdate, FabricView},
    DeleteTarget, ImageKind,
};

use super::images::{self, AppendResponse, DeleteResponse, ReplaceResponse};
use super::{OkResponse, ServerState};
use crate::errors::JsonApiError;

#[utoipa::path(get, path = "/api/fabrics", tag = "fabrics", responses((status = 200, description = "All fabrics with images and works")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<FabricView>>, JsonApiError> {
    Ok(Json(fabrics::list(&state.db).await?))
}

#[utoipa::path(
    post, path = "/api/fabrics", tag = "fabrics",
    request_body = crate::openapi::FabricInputDoc,
    responses((status = 200, description = "Created"), (status = 400, description = "Validation Error"))
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<FabricInput>) -> Result<Json<FabricView>, JsonApiError> {
    Ok(Json(fabrics::create(&state.db, input).await?))
}

#[utoipa::path(
    get, path = "/api/fabrics/{id}", tag = "fabrics",
    params(("id" = i32, Path, description = "Fabric id")),
    responses((status = 200, description = "Fabric"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<FabricView>, JsonApiError> {
    Ok(Json(fabrics::get(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/api/fabrics/{id}", tag = "fabrics",
    params(("id" = i32, Path, description = "Fabric id")),
    request_body = crate::openapi::FabricUpdateDoc,
    responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<FabricUpdate>,
) -> Result<Json<FabricView>, JsonApiError> {
    Ok(Json(fabrics::update(&state.db, id, input).await?))
}

#[utoipa::path(
    delete, path = "/api/fabrics/{id}", tag = "fabrics",
    params(("id" = i32, Path, description = "Fabric id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<OkResponse>, JsonApiError> {
    fabrics::delete(&state.db, id).await?;
    Ok(OkResponse::ok())
}

#[utoipa::path(
    post, path = "/api/fabrics/{id}/images", tag = "fabrics",
    params(("id" = i32, Path, description = "Fabric id")),
    request_body = Vec<String>,
    responses((status = 200, description = "Appended, existing URLs skipped"), (status = 404, description = "Not Found"))
)]
pub async fn append_images(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(urls): Json<Vec<String>>,
) -> Result<Json<AppendResponse>, JsonApiError> {
    images::append(&state, ImageKind::FabricImage, id, urls).await
}

#[utoipa::path(
    put, path = "/api/fabrics/{id}/images", tag = "fabrics",
    params(("id" = i32, Path, description = "Fabric id")),
    request_body = Vec<String>,
    responses((status = 200, description = "Replaced"), (status = 404, description = "Not Found"))
)]
pub async fn replace_images(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(urls): Json<Vec<String>>,
) -> Result<Json<ReplaceResponse>, JsonApiError> {
    images::replace(&state, ImageKind::FabricImage, id, urls).await
}

#[utoipa::path(
    delete, path = "/api/fabrics/{id}/images", tag = "fabrics",
    params(("id" = i32, Path, description = "Fabric id")),
    request_body = crate::openapi::DeleteTargetDoc,
    responses((status = 200, description = "Deleted"), (status = 400, description = "No target"), (status = 404, description = "Not Found"))
)]
pub async fn delete_images(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(target): Json<DeleteTarget>,
) -> Result<Json<DeleteResponse>, JsonApiError> {
    images::remove(&state, ImageKind::FabricImage, id, target).await
}

#[utoipa::path(
    post, path = "/api/fabrics/{id}/works", tag = "fabrics",
    params(("id" = i32, Path, description = "Fabric id")),
    request_body = Vec<String>,
    responses((status = 200, description = "Appended, existing URLs skipped"), (status = 404, description = "Not Found"))
)]
pub async fn append_works(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(urls): Json<Vec<String>>,
) -> Result<Json<AppendResponse>, JsonApiError> {
    images::append(&state, ImageKind::FabricWork, id, urls).await
}

#[utoipa::path(
    put, path = "/api/fabrics/{id}/works", tag = "fabrics",
    params(("id" = i32, Path, description = "Fabric id")),
    request_body = Vec<String>,
    responses((status = 200, description = "Replaced"), (status = 404, description = "Not Found"))
)]
pub async fn replace_works(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(urls): Json<Vec<String>>,
) -> Result<Json<ReplaceResponse>, JsonApiError> {
    images::replace(&state, ImageKind::FabricWork, id, urls).await
}

#[utoipa::path(
    delete, path = "/api/fabrics/{id}/works", tag = "fabrics",
    params(("id" = i32, Path, description = "Fabric id")),
    request_body = crate::openapi::DeleteTargetDoc,
    responses((status = 200, description = "Deleted"), (status = 400, description = "No target"), (status = 404, description = "Not Found"))
)]
pub async fn delete_works(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(target): Json<DeleteTarget>,
) -> Result<Json<DeleteResponse>, JsonApiError> {
    images::remove(&state, ImageKind::FabricWork, id, target).await
}
