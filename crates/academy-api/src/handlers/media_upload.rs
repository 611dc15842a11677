//! Media upload handler (admin only).
//!
//! Uploads write the binary to storage first and then record the asset row in
//! a transaction. If the insert fails the stored binary is deleted again in a
//! background task, so no dangling binaries accumulate.

use std::sync::Arc;

use academy_core::models::{MediaAsset, MediaKind, NewMediaAsset};
use academy_core::validation::extension_of;
use academy_core::AppError;
use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::transaction::with_transaction;

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub kind: MediaKind,
}

struct UploadForm {
    filename: String,
    content_type: String,
    data: Vec<u8>,
    title: Option<String>,
    description: Option<String>,
}

async fn read_multipart(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut title = None;
    let mut description = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| AppError::InvalidInput("Missing filename".to_string()))?;
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .ok_or_else(|| AppError::InvalidInput("Missing content type".to_string()))?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Failed to read file: {}", e)))?
                    .to_vec();
                file = Some((filename, content_type, data));
            }
            "title" => {
                title = Some(field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read title: {}", e))
                })?);
            }
            "description" => {
                description = Some(field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read description: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let (filename, content_type, data) =
        file.ok_or_else(|| AppError::InvalidInput("Missing 'file' field".to_string()))?;

    Ok(UploadForm {
        filename,
        content_type,
        data,
        title,
        description,
    })
}

#[utoipa::path(
    post,
    path = "/api/v0/admin/media",
    tag = "media",
    params(
        ("kind" = MediaKind, Query, description = "Asset kind: photo or video")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Media uploaded", body = MediaAsset),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(kind = ?query.kind, operation = "upload_media"))]
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploadQuery>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = read_multipart(multipart).await?;

    let limits = state.media.limits_for(query.kind);
    limits
        .validator()
        .validate(&form.filename, &form.content_type, form.data.len())?;

    // Files are stored under a generated name; the original stays on the row.
    let extension = extension_of(&form.filename)
        .ok_or_else(|| AppError::InvalidInput(format!("Invalid filename: {}", form.filename)))?;
    let stored_filename = format!("{}.{}", Uuid::new_v4(), extension);
    let file_size = form.data.len() as i64;

    let (storage_key, storage_url) = state
        .media
        .storage
        .upload(query.kind, &stored_filename, &form.content_type, form.data)
        .await?;

    let title = form
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| form.filename.clone());

    let new = NewMediaAsset {
        media_kind: query.kind,
        title,
        description: form.description,
        filename: stored_filename,
        original_filename: form.filename,
        content_type: form.content_type,
        file_size,
        storage_backend: state.media.storage.backend_type(),
        storage_key: storage_key.clone(),
        storage_url,
    };

    let asset = match with_transaction(&state.db.pool, |tx| {
        let repo = state.media.repository.clone();
        let new = new.clone();
        Box::pin(async move { repo.create_in_tx(tx, &new).await })
    })
    .await
    {
        Ok(asset) => asset,
        Err(e) => {
            let storage = state.media.storage.clone();
            tokio::spawn(async move {
                if let Err(cleanup_err) = storage.delete(&storage_key).await {
                    tracing::warn!(
                        error = %cleanup_err,
                        storage_key = %storage_key,
                        "Failed to cleanup storage file after DB error"
                    );
                }
            });
            return Err(e.into());
        }
    };

    tracing::info!(
        media_id = %asset.id,
        kind = ?asset.media_kind,
        file_size = asset.file_size,
        "Media uploaded"
    );

    Ok((StatusCode::CREATED, Json(asset)))
}
