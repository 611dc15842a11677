use academy_core::constants::MAX_LIST_RESULTS;
use academy_core::models::{MediaAsset, MediaKind, MediaUpdate, NewMediaAsset};
use academy_core::AppError;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Repository for gallery media assets.
///
/// Each row carries both descriptive metadata and the storage reference
/// (backend, key, public URL). Deleting the row is the authoritative removal;
/// the caller cleans up the binary afterwards on a best-effort basis.
#[derive(Clone)]
pub struct MediaRepository {
    pool: PgPool,
}

impl MediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a media row inside an existing transaction. Used by the upload
    /// flow so the caller can roll back and delete the already-stored binary
    /// if the insert fails.
    #[tracing::instrument(skip(self, tx, new), fields(db.table = "media_assets", db.operation = "insert"))]
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        new: &NewMediaAsset,
    ) -> Result<MediaAsset, AppError> {
        let id = Uuid::new_v4();

        let asset = sqlx::query_as::<Postgres, MediaAsset>(
            r#"
            INSERT INTO media_assets (
                id, media_kind, title, description, filename, original_filename,
                content_type, file_size, storage_backend, storage_key, storage_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new.media_kind)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.filename)
        .bind(&new.original_filename)
        .bind(&new.content_type)
        .bind(new.file_size)
        .bind(new.storage_backend)
        .bind(&new.storage_key)
        .bind(&new.storage_url)
        .fetch_one(&mut **tx)
        .await?;

        Ok(asset)
    }

    #[tracing::instrument(skip(self), fields(db.table = "media_assets", db.operation = "select"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<MediaAsset>, AppError> {
        let asset = sqlx::query_as::<Postgres, MediaAsset>(
            "SELECT * FROM media_assets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(asset)
    }

    /// Admin listing. Archived assets are included unless filtered out.
    #[tracing::instrument(skip(self), fields(db.table = "media_assets", db.operation = "select"))]
    pub async fn list(
        &self,
        kind: Option<MediaKind>,
        include_archived: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaAsset>, AppError> {
        let limit = limit.clamp(1, MAX_LIST_RESULTS);
        let offset = offset.max(0);

        let assets = sqlx::query_as::<Postgres, MediaAsset>(
            r#"
            SELECT * FROM media_assets
            WHERE ($1::media_kind IS NULL OR media_kind = $1)
              AND ($2 OR is_archived = FALSE)
            ORDER BY uploaded_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(kind)
        .bind(include_archived)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(assets)
    }

    /// Public gallery listing. Archived assets never appear here; the filter
    /// is applied in the query, not by clients.
    #[tracing::instrument(skip(self), fields(db.table = "media_assets", db.operation = "select"))]
    pub async fn list_public(
        &self,
        kind: MediaKind,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaAsset>, AppError> {
        let limit = limit.clamp(1, MAX_LIST_RESULTS);
        let offset = offset.max(0);

        let assets = sqlx::query_as::<Postgres, MediaAsset>(
            r#"
            SELECT * FROM media_assets
            WHERE media_kind = $1 AND is_archived = FALSE
            ORDER BY uploaded_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(kind)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(assets)
    }

    #[tracing::instrument(skip(self, update), fields(db.table = "media_assets", db.operation = "update"))]
    pub async fn update(
        &self,
        id: Uuid,
        update: &MediaUpdate,
    ) -> Result<MediaAsset, AppError> {
        if update.is_empty() {
            return Err(AppError::BadRequest("No fields to update".to_string()));
        }

        let asset = sqlx::query_as::<Postgres, MediaAsset>(
            r#"
            UPDATE media_assets
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                is_archived = COALESCE($4, is_archived),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.is_archived)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Media asset {} not found", id)))?;

        Ok(asset)
    }

    /// Delete the row and return it so the caller can remove the binary.
    #[tracing::instrument(skip(self), fields(db.table = "media_assets", db.operation = "delete"))]
    pub async fn delete_returning(&self, id: Uuid) -> Result<Option<MediaAsset>, AppError> {
        let asset = sqlx::query_as::<Postgres, MediaAsset>(
            "DELETE FROM media_assets WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(asset)
    }
}
