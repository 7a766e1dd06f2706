
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{Health, Version};
use service::upload::UploadService;

use crate::openapi::ApiDoc;

pub mod categories;
pub mod fabrics;
pub mod images;
pub mod orders;
pub mod products;
pub mod public;
pub mod uploads;

/// Largest multipart body accepted by the upload routes.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub uploads: UploadService,
}

/// `{"ok": true}` for plain deletes.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Json<Self> {
        Json(Self { ok: true })
    }
}

#[utoipa::path(get, path = "/api/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[utoipa::path(get, path = "/__version", tag = "health", responses((status = 200, description = "Crate version", body = crate::openapi::VersionResponse)))]
pub async fn version() -> Json<Version> {
    Json(Version { version: env!("CARGO_PKG_VERSION") })
}

/// Build the full application router: JSON API, docs and static files.
pub fn build_router(state: ServerState, cors: CorsLayer, static_root: &str) -> Router {
    let catalog = Router::new()
        .route("/api/fabrics", get(fabrics::list).post(fabrics::create))
        .route("/api/fabrics/:id", get(fabrics::get).put(fabrics::update).delete(fabrics::delete))
        .route(
            "/api/fabrics/:id/images",
            post(fabrics::append_images).put(fabrics::replace_images).delete(fabrics::delete_images),
        )
        .route(
            "/api/fabrics/:id/works",
            post(fabrics::append_works).put(fabrics::replace_works).delete(fabrics::delete_works),
        )
        .route("/api/products", get(products::list).post(products::create))
        .route("/api/products/:id", get(products::get).put(products::update).delete(products::delete))
        .route(
            "/api/products/:id/images",
            post(products::append_images).put(products::replace_images).delete(products::delete_images),
        )
        .route("/api/categories", get(categories::list).post(categories::create))
        .route("/api/categories/:id", get(categories::get).put(categories::update).delete(categories::delete));

    let orders = Router::new()
        .route("/api/orders", get(orders::list).post(orders::create))
        .route("/api/orders/items/:item_id", put(orders::update_item))
        .route("/api/orders/:id", get(orders::get).put(orders::update).delete(orders::delete));

    let storefront = Router::new()
        .route("/api/public/fabrics", get(public::fabrics))
        .route("/api/public/fabrics/clearance", get(public::clearance_fabrics))
        .route("/api/public/categories", get(public::categories))
        .route("/api/public/products/by_category/:id", get(public::products_by_category));

    let uploads = Router::new()
        .route("/api/upload/fabrics/:id", post(uploads::fabric))
        .route("/api/upload/products/:id", post(uploads::product))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    Router::new()
        .route("/api/health", get(health))
        .route("/__version", get(version))
        .merge(catalog)
        .merge(orders)
        .merge(storefront)
        .merge(uploads)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest_service("/static", ServeDir::new(static_root))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
