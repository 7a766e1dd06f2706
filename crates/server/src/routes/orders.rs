use axum::{
    extract::{Path, State},
    Json,
};

use models::order_item;
use service::orders::{self, NewOrder, OrderItemInput, OrderUpdate, OrderView};

use super::{OkResponse, ServerState};
use crate::errors::JsonApiError;

#[utoipa::path(get, path = "/api/orders", tag = "orders", responses((status = 200, description = "All orders with items")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<OrderView>>, JsonApiError> {
    Ok(Json(orders::list(&state.db).await?))
}

#[utoipa::path(
    post, path = "/api/orders", tag = "orders",
    request_body = crate::openapi::NewOrderDoc,
    responses((status = 200, description = "Created"), (status = 400, description = "Unknown product or fabric"))
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<NewOrder>) -> Result<Json<OrderView>, JsonApiError> {
    Ok(Json(orders::create(&state.db, input).await?))
}

#[utoipa::path(
    get, path = "/api/orders/{id}", tag = "orders",
    params(("id" = i32, Path, description = "Order id")),
    responses((status = 200, description = "Order"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<OrderView>, JsonApiError> {
    Ok(Json(orders::get(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/api/orders/{id}", tag = "orders",
    params(("id" = i32, Path, description = "Order id")),
    request_body = crate::openapi::OrderUpdateDoc,
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<OrderUpdate>,
) -> Result<Json<OrderView>, JsonApiError> {
    Ok(Json(orders::update(&state.db, id, input).await?))
}

#[utoipa::path(
    put, path = "/api/orders/items/{item_id}", tag = "orders",
    params(("item_id" = i32, Path, description = "Order item id")),
    request_body = crate::openapi::OrderItemInputDoc,
    responses((status = 200, description = "Updated; prices are not recomputed"), (status = 404, description = "Not Found"))
)]
pub async fn update_item(
    State(state): State<ServerState>,
    Path(item_id): Path<i32>,
    Json(input): Json<OrderItemInput>,
) -> Result<Json<order_item::Model>, JsonApiError> {
    Ok(Json(orders::update_item(&state.db, item_id, input).await?))
}

#[utoipa::path(
    delete, path = "/api/orders/{id}", tag = "orders",
    params(("id" = i32, Path, description = "Order id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<OkResponse>, JsonApiError> {
    orders::delete(&state.db, id).await?;
    Ok(OkResponse::ok())
}
