use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use service::upload::{FabricAssetKind, IncomingFile, UploadTarget};

use super::ServerState;
use crate::errors::JsonApiError;

const FILES_FIELD: &str = "files";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct UploadQuery {
    /// `image` (default) or `work`.
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub saved: Vec<String>,
}

/// Drain every `files` part; other parts are ignored.
async fn collect_files(mut multipart: Multipart) -> Result<Vec<IncomingFile>, JsonApiError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| JsonApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| JsonApiError::bad_request(format!("cannot read upload: {e}")))?;
        files.push(IncomingFile { file_name, bytes: bytes.to_vec() });
    }
    if files.is_empty() {
        return Err(JsonApiError::bad_request("at least one 'files' part is required"));
    }
    Ok(files)
}

#[utoipa::path(
    post, path = "/api/upload/fabrics/{id}", tag = "uploads",
    params(("id" = i32, Path, description = "Fabric id"), UploadQuery),
    responses((status = 200, description = "Public URLs of the stored files"), (status = 400, description = "Bad kind or no files"))
)]
pub async fn fabric(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Query(q): Query<UploadQuery>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, JsonApiError> {
    let kind = FabricAssetKind::parse(q.kind.as_deref().unwrap_or("image"))?;
    let files = collect_files(multipart).await?;
    let saved = state.uploads.save_batch(UploadTarget::Fabric { id, kind }, files).await?;
    info!(fabric_id = id, count = saved.len(), "fabric_upload");
    Ok(Json(UploadResponse { saved }))
}

#[utoipa::path(
    post, path = "/api/upload/products/{id}", tag = "uploads",
    params(("id" = i32, Path, description = "Product id")),
    responses((status = 200, description = "Public URLs of the stored files"), (status = 400, description = "No files"))
)]
pub async fn product(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, JsonApiError> {
    let files = collect_files(multipart).await?;
    let saved = state.uploads.save_batch(UploadTarget::Product { id }, files).await?;
    info!(product_id = id, count = saved.len(), "product_upload");
    Ok(Json(UploadResponse { saved }))
}
