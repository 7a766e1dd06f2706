//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::{info, warn};

/// Ensure the static and upload directories exist before the router mounts them.
pub async fn ensure_env(static_root: &str, upload_root: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(static_root).await.is_err() {
        warn!(%static_root, "static directory missing; creating it");
        tokio::fs::create_dir_all(static_root)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {static_root}: {e}"))?;
    }
    tokio::fs::create_dir_all(upload_root)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {upload_root}: {e}"))?;
    info!(%static_root, %upload_root, "storage directories ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_nested_upload_root() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let base = dir.path().join("static");
        let uploads = base.join("uploads");
        ensure_env(base.to_str().unwrap(), uploads.to_str().unwrap()).await?;
        assert!(tokio::fs::metadata(&uploads).await?.is_dir());
        Ok(())
    }

    #[tokio::test]
    async fn creates_static_root_outside_upload_root() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let base = dir.path().join("public");
        let uploads = dir.path().join("uploads");
        ensure_env(base.to_str().unwrap(), uploads.to_str().unwrap()).await?;
        assert!(tokio::fs::metadata(&base).await?.is_dir());
        assert!(tokio::fs::metadata(&uploads).await?.is_dir());
        Ok(())
    }
}
