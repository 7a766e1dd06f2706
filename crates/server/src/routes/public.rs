//! Storefront reads. No writes are routed here.

use axum::{
    extract::{Path, State},
    Json,
};

use models::category;
use service::catalog::{fabrics::FabricView, products::ProductView};
use service::public;

use super::ServerState;
use crate::errors::JsonApiError;

#[utoipa::path(get, path = "/api/public/fabrics", tag = "public", responses((status = 200, description = "All fabrics")))]
pub async fn fabrics(State(state): State<ServerState>) -> Result<Json<Vec<FabricView>>, JsonApiError> {
    Ok(Json(public::list_fabrics(&state.db).await?))
}

#[utoipa::path(get, path = "/api/public/fabrics/clearance", tag = "public", responses((status = 200, description = "Fabrics on clearance")))]
pub async fn clearance_fabrics(State(state): State<ServerState>) -> Result<Json<Vec<FabricView>>, JsonApiError> {
    Ok(Json(public::list_clearance_fabrics(&state.db).await?))
}

#[utoipa::path(get, path = "/api/public/categories", tag = "public", responses((status = 200, description = "All categories")))]
pub async fn categories(State(state): State<ServerState>) -> Result<Json<Vec<category::Model>>, JsonApiError> {
    Ok(Json(public::list_categories(&state.db).await?))
}

#[utoipa::path(
    get, path = "/api/public/products/by_category/{id}", tag = "public",
    params(("id" = i32, Path, description = "Category id")),
    responses((status = 200, description = "Products of the category, empty when unknown"))
)]
pub async fn products_by_category(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Vec<ProductView>>, JsonApiError> {
    Ok(Json(public::list_products_by_category(&state.db, id).await?))
}
