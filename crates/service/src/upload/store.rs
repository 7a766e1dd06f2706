use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::errors::ServiceError;

/// Where uploaded bytes go.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` at the `/`-separated `key` and return its public URL.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<String, ServiceError>;
}

/// Files below a root directory, served under `public_prefix`.
#[derive(Clone, Debug)]
pub struct LocalDiskStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalDiskStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: &str) -> Self {
        Self { root: root.into(), public_prefix: public_prefix.trim_end_matches('/').to_string() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, ServiceError> {
        let mut path = self.root.clone();
        for part in key.split('/') {
            if part.is_empty() || part == "." || part == ".." {
                return Err(ServiceError::Validation(format!("invalid storage key '{key}'")));
            }
            path.push(part);
        }
        Ok(path)
    }
}

#[async_trait]
impl BlobStore for LocalDiskStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<String, ServiceError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, bytes).await?;
        Ok(format!("{}/{}", self.public_prefix, key))
    }
}
