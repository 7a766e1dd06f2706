use axum::{
    extract::{Path, State},
    Json,
};

use service::catalog::{
    products::{self, ProductInput, ProductUpdate, ProductView},
    DeleteTarget, ImageKind,
};

use super::images::{self, AppendResponse, DeleteResponse, ReplaceResponse};
use super::{OkResponse, ServerState};
use crate::errors::JsonApiError;

#[utoipa::path(get, path = "/api/products", tag = "products", responses((status = 200, description = "All products with images")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ProductView>>, JsonApiError> {
    Ok(Json(products::list(&state.db).await?))
}

#[utoipa::path(
    post, path = "/api/products", tag = "products",
    request_body = crate::openapi::ProductInputDoc,
    responses((status = 200, description = "Created"), (status = 400, description = "Unknown category or blank name"))
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<ProductInput>) -> Result<Json<ProductView>, JsonApiError> {
    Ok(Json(products::create(&state.db, input).await?))
}

#[utoipa::path(
    get, path = "/api/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses((status = 200, description = "Product"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<ProductView>, JsonApiError> {
    Ok(Json(products::get(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/api/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = crate::openapi::ProductUpdateDoc,
    responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<ProductUpdate>,
) -> Result<Json<ProductView>, JsonApiError> {
    Ok(Json(products::update(&state.db, id, input).await?))
}

#[utoipa::path(
    delete, path = "/api/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"), (status = 409, description = "Referenced by orders"))
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<OkResponse>, JsonApiError> {
    products::delete(&state.db, id).await?;
    Ok(OkResponse::ok())
}

#[utoipa::path(
    post, path = "/api/products/{id}/images", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = Vec<String>,
    responses((status = 200, description = "Appended, existing URLs skipped"), (status = 404, description = "Not Found"))
)]
pub async fn append_images(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(urls): Json<Vec<String>>,
) -> Result<Json<AppendResponse>, JsonApiError> {
    images::append(&state, ImageKind::ProductImage, id, urls).await
}

#[utoipa::path(
    put, path = "/api/products/{id}/images", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = Vec<String>,
    responses((status = 200, description = "Replaced"), (status = 404, description = "Not Found"))
)]
pub async fn replace_images(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(urls): Json<Vec<String>>,
) -> Result<Json<ReplaceResponse>, JsonApiError> {
    images::replace(&state, ImageKind::ProductImage, id, urls).await
}

#[utoipa::path(
    delete, path = "/api/products/{id}/images", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = crate::openapi::DeleteTargetDoc,
    responses((status = 200, description = "Deleted"), (status = 400, description = "No target"), (status = 404, description = "Not Found"))
)]
pub async fn delete_images(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(target): Json<DeleteTarget>,
) -> Result<Json<DeleteResponse>, JsonApiError> {
    images::remove(&state, ImageKind::ProductImage, id, target).await
}
