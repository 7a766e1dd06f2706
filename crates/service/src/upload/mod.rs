//! File uploads for fabric and product galleries.
//!
//! Files land below the configured upload root and are addressed by a public
//! path the caller later registers through the catalog. The database is not
//! touched here.

mod store;

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;

pub use store::{BlobStore, LocalDiskStore};

/// Which fabric list an upload belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FabricAssetKind {
    Image,
    Work,
}

impl FabricAssetKind {
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        match raw {
            "image" => Ok(Self::Image),
            "work" => Ok(Self::Work),
            other => Err(ServiceError::Validation(format!("kind must be 'image' or 'work', got '{other}'"))),
        }
    }

    fn dir(&self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Work => "works",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadTarget {
    Fabric { id: i32, kind: FabricAssetKind },
    Product { id: i32 },
}

impl UploadTarget {
    /// Directory below the upload root, always `/`-separated.
    pub fn relative_dir(&self) -> String {
        match self {
            Self::Fabric { id, kind } => format!("fabrics/{id}/{}", kind.dir()),
            Self::Product { id } => format!("products/{id}/images"),
        }
    }
}

/// One received file.
#[derive(Clone, Debug)]
pub struct IncomingFile {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Lowercased extension with its dot, `.jpg` when there is none.
pub fn extension_of(file_name: Option<&str>) -> String {
    file_name
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_else(|| ".jpg".to_string())
}

/// `<index>_<uuid><ext>`, unique per call.
pub fn stored_file_name(index: usize, original: Option<&str>) -> String {
    format!("{index}_{}{}", Uuid::new_v4().simple(), extension_of(original))
}

#[derive(Clone)]
pub struct UploadService {
    store: Arc<dyn BlobStore>,
}

impl UploadService {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Write every file under the target directory; returns public URLs in input order.
    #[instrument(skip(self, files), fields(dir = %target.relative_dir(), files = files.len()))]
    pub async fn save_batch(&self, target: UploadTarget, files: Vec<IncomingFile>) -> Result<Vec<String>, ServiceError> {
        let dir = target.relative_dir();
        let mut saved = Vec::with_capacity(files.len());
        for (index, file) in files.into_iter().enumerate() {
            let name = stored_file_name(index, file.file_name.as_deref());
            let url = self.store.put(&format!("{dir}/{name}"), &file.bytes).await?;
            saved.push(url);
        }
        info!(saved = saved.len(), "upload_saved");
        Ok(saved)
    }
}
