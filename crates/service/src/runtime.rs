//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Ensure the static and upload directories exist.
pub async fn ensure_env(static_root: &str, upload_root: &str) -> anyhow::Result<()> {
    common::env::ensure_env(static_root, upload_root).await
}
