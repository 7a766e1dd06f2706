#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use migration::MigratorTrait;
use tempfile::TempDir;
use tower_http::cors::CorsLayer;

use models::db::{connect_with_config, DatabaseConfig};
use server::routes::{self, ServerState};
use service::upload::{LocalDiskStore, UploadService};

/// Router over a fresh in-memory database and a throwaway static root.
/// Keep the `TempDir` alive for as long as the router is used.
pub struct TestApp {
    pub router: Router,
    pub static_dir: TempDir,
}

pub async fn test_app() -> anyhow::Result<TestApp> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;

    let static_dir = tempfile::tempdir()?;
    let upload_root = static_dir.path().join("uploads");
    let store = Arc::new(LocalDiskStore::new(upload_root, "/static/uploads"));
    let state = ServerState { db, uploads: UploadService::new(store) };

    let static_root = static_dir.path().to_string_lossy().to_string();
    let router = routes::build_router(state, CorsLayer::very_permissive(), &static_root);
    Ok(TestApp { router, static_dir })
}

pub const BOUNDARY: &str = "wanshop-test-boundary";

/// Hand-built multipart body with one `files` part per `(file_name, bytes)`.
pub fn multipart_body(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, bytes) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"files\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
