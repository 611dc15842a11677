//! Media asset handlers (admin only): listing, metadata updates, deletion.

use std::sync::Arc;

use academy_core::constants::DEFAULT_PAGE_SIZE;
use academy_core::models::{MediaAsset, MediaKind, MediaUpdate};
use academy_core::AppError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListMediaQuery {
    pub kind: Option<MediaKind>,
    #[serde(default = "default_include_archived")]
    pub include_archived: bool,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_include_archived() -> bool {
    true
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[utoipa::path(
    get,
    path = "/api/v0/admin/media",
    tag = "media",
    params(
        ("kind" = Option<MediaKind>, Query, description = "Filter by kind"),
        ("include_archived" = Option<bool>, Query, description = "Include archived assets (default true)"),
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Media assets", body = Vec<MediaAsset>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_media"))]
pub async fn list_media(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListMediaQuery>,
) -> Result<Json<Vec<MediaAsset>>, HttpAppError> {
    let assets = state
        .media
        .repository
        .list(query.kind, query.include_archived, query.limit, query.offset)
        .await?;
    Ok(Json(assets))
}

#[utoipa::path(
    get,
    path = "/api/v0/admin/media/{id}",
    tag = "media",
    params(("id" = Uuid, Path, description = "Media ID")),
    responses(
        (status = 200, description = "Media asset", body = MediaAsset),
        (status = 404, description = "Media not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(media_id = %id, operation = "get_media"))]
pub async fn get_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MediaAsset>, HttpAppError> {
    let asset = state
        .media
        .repository
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Media asset {} not found", id)))?;
    Ok(Json(asset))
}

const DOWNLOAD_URL_TTL: Duration = Duration::from_secs(900);

#[derive(Debug, Serialize, ToSchema)]
pub struct MediaDownloadUrl {
    pub url: String,
    pub expires_in_secs: u64,
}

/// Temporary direct-access URL for the stored binary. S3 returns a presigned
/// URL; local storage returns its public URL and ignores the expiry.
#[utoipa::path(
    get,
    path = "/api/v0/admin/media/{id}/url",
    tag = "media",
    params(("id" = Uuid, Path, description = "Media ID")),
    responses(
        (status = 200, description = "Download URL", body = MediaDownloadUrl),
        (status = 404, description = "Media not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(media_id = %id, operation = "get_media_download_url"))]
pub async fn get_media_download_url(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MediaDownloadUrl>, HttpAppError> {
    let asset = state
        .media
        .repository
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Media asset {} not found", id)))?;

    let url = state
        .media
        .storage
        .get_presigned_url(&asset.storage_key, DOWNLOAD_URL_TTL)
        .await
        .map_err(HttpAppError::from)?;

    Ok(Json(MediaDownloadUrl {
        url,
        expires_in_secs: DOWNLOAD_URL_TTL.as_secs(),
    }))
}

/// Update title, description, or the archive flag. Archiving removes the
/// asset from the public gallery without touching the stored binary.
#[utoipa::path(
    put,
    path = "/api/v0/admin/media/{id}",
    tag = "media",
    params(("id" = Uuid, Path, description = "Media ID")),
    request_body = MediaUpdate,
    responses(
        (status = 200, description = "Media updated", body = MediaAsset),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Media not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, update), fields(media_id = %id, operation = "update_media"))]
pub async fn update_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(update): ValidatedJson<MediaUpdate>,
) -> Result<Json<MediaAsset>, HttpAppError> {
    update.validate().map_err(HttpAppError::from)?;
    let asset = state.media.repository.update(id, &update).await?;
    Ok(Json(asset))
}

/// Delete a media asset.
///
/// The database row is removed first; that alone removes the asset from all
/// listings. The binary delete runs afterwards and a failure there only logs,
/// it never resurrects the asset.
#[utoipa::path(
    delete,
    path = "/api/v0/admin/media/{id}",
    tag = "media",
    params(("id" = Uuid, Path, description = "Media ID")),
    responses(
        (status = 204, description = "Media deleted"),
        (status = 404, description = "Media not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(media_id = %id, operation = "delete_media"))]
pub async fn delete_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    let asset = state
        .media
        .repository
        .delete_returning(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Media asset {} not found", id)))?;

    let storage = state.media.storage.clone();
    tokio::spawn(async move {
        if let Err(e) = storage.delete(&asset.storage_key).await {
            tracing::warn!(
                error = %e,
                media_id = %asset.id,
                storage_key = %asset.storage_key,
                "Failed to delete media binary; row already removed"
            );
        }
    });

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::config::{AcademyConfig, BaseConfig};
    use academy_core::models::{MediaKind, NewMediaAsset};
    use academy_core::{Config, StorageBackend};
    use academy_db::{
        InquiryRepository, MediaRepository, ProfileRepository, StudentRepository,
        TestimonialRepository,
    };
    use academy_storage::{Storage, StorageError, StorageResult};
    use crate::state::{AppState, ContentState, DbState, MediaLimits, MediaState};
    use async_trait::async_trait;
    use sqlx::PgPool;

    /// Storage whose delete always fails, for exercising the row-first delete
    /// contract.
    struct FailingStorage;

    #[async_trait]
    impl Storage for FailingStorage {
        async fn upload(
            &self,
            _kind: MediaKind,
            _filename: &str,
            _content_type: &str,
            _data: Vec<u8>,
        ) -> StorageResult<(String, String)> {
            Err(StorageError::BackendError("unavailable".to_string()))
        }

        async fn download(&self, _storage_key: &str) -> StorageResult<Vec<u8>> {
            Err(StorageError::BackendError("unavailable".to_string()))
        }

        async fn delete(&self, storage_key: &str) -> StorageResult<()> {
            Err(StorageError::DeleteFailed(format!(
                "backend refused to delete {}",
                storage_key
            )))
        }

        async fn get_presigned_url(
            &self,
            _storage_key: &str,
            _expires_in: Duration,
        ) -> StorageResult<String> {
            Err(StorageError::BackendError("unavailable".to_string()))
        }

        async fn exists(&self, _storage_key: &str) -> StorageResult<bool> {
            Ok(false)
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Local
        }
    }

    fn test_config() -> Config {
        Config(Box::new(AcademyConfig {
            base: BaseConfig {
                server_port: 4000,
                cors_origins: vec!["http://localhost:3000".to_string()],
                db_max_connections: 5,
                db_timeout_seconds: 30,
                admin_api_key: "a".repeat(32),
                environment: "development".to_string(),
            },
            database_url: "postgres://localhost/academy".to_string(),
            storage_backend: Some(StorageBackend::Local),
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            aws_region: None,
            local_storage_path: Some("/tmp/academy-media".to_string()),
            local_storage_base_url: Some("http://localhost:4000/media".to_string()),
            max_photo_size_bytes: 10 * 1024 * 1024,
            photo_allowed_extensions: vec!["jpg".to_string()],
            photo_allowed_content_types: vec!["image/jpeg".to_string()],
            max_video_size_bytes: 200 * 1024 * 1024,
            video_allowed_extensions: vec!["mp4".to_string()],
            video_allowed_content_types: vec!["video/mp4".to_string()],
            email_notifications_enabled: false,
            smtp_host: None,
            smtp_port: None,
            smtp_user: None,
            smtp_password: None,
            smtp_from: None,
            smtp_tls: false,
            inquiry_inbox: None,
            academy_name: "Dance Academy".to_string(),
        }))
    }

    fn test_state(pool: PgPool) -> Arc<AppState> {
        Arc::new(AppState {
            db: DbState {
                pool: pool.clone(),
                inquiries: InquiryRepository::new(pool.clone()),
                students: StudentRepository::new(pool.clone()),
            },
            media: MediaState {
                repository: MediaRepository::new(pool.clone()),
                storage: Arc::new(FailingStorage),
                photo_limits: MediaLimits {
                    max_file_size: 10 * 1024 * 1024,
                    allowed_extensions: vec!["jpg".to_string()],
                    allowed_content_types: vec!["image/jpeg".to_string()],
                },
                video_limits: MediaLimits {
                    max_file_size: 200 * 1024 * 1024,
                    allowed_extensions: vec!["mp4".to_string()],
                    allowed_content_types: vec!["video/mp4".to_string()],
                },
            },
            content: ContentState {
                testimonials: TestimonialRepository::new(pool.clone()),
                profile: ProfileRepository::new(pool.clone()),
            },
            email: None,
            config: test_config(),
            is_production: false,
        })
    }

    async fn insert_photo(pool: &PgPool) -> MediaAsset {
        let repository = MediaRepository::new(pool.clone());
        let mut tx = pool.begin().await.unwrap();
        let asset = repository
            .create_in_tx(
                &mut tx,
                &NewMediaAsset {
                    media_kind: MediaKind::Photo,
                    title: "Annual day".to_string(),
                    description: None,
                    filename: "abc123.jpg".to_string(),
                    original_filename: "annual-day.jpg".to_string(),
                    content_type: "image/jpeg".to_string(),
                    file_size: 1024,
                    storage_backend: StorageBackend::Local,
                    storage_key: "gallery/photos/abc123.jpg".to_string(),
                    storage_url: "http://localhost:4000/media/gallery/photos/abc123.jpg"
                        .to_string(),
                },
            )
            .await
            .unwrap();
        tx.commit().await.unwrap();
        asset
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn delete_succeeds_and_asset_leaves_listings_when_binary_delete_fails(pool: PgPool) {
        let state = test_state(pool.clone());
        let asset = insert_photo(&pool).await;

        let status = delete_media(State(state.clone()), Path(asset.id))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        // The row is gone regardless of the storage backend failing.
        let repository = MediaRepository::new(pool.clone());
        assert!(repository.get_by_id(asset.id).await.unwrap().is_none());
        assert!(repository.list(None, true, 50, 0).await.unwrap().is_empty());
        assert!(repository
            .list_public(MediaKind::Photo, 50, 0)
            .await
            .unwrap()
            .is_empty());

        // Deleting again reports not found.
        let err = delete_media(State(state), Path(asset.id)).await.unwrap_err();
        assert!(matches!(err.0, AppError::NotFound(_)));
    }
}
