//! Gallery media models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::storage_types::StorageBackend;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Media kind enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "media_kind", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

impl std::str::FromStr for MediaKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "photo" => Ok(MediaKind::Photo),
            "video" => Ok(MediaKind::Video),
            _ => Err(anyhow::anyhow!("Invalid media kind: {}", s)),
        }
    }
}

/// A gallery asset. The row is the single source of truth for both the
/// descriptive metadata and the storage reference to the binary.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct MediaAsset {
    pub id: Uuid,
    pub media_kind: MediaKind,
    pub title: String,
    pub description: Option<String>,
    pub filename: String,
    pub original_filename: String,
    pub content_type: String,
    pub file_size: i64,
    pub storage_backend: StorageBackend,
    pub storage_key: String,
    pub storage_url: String,
    pub is_archived: bool,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public projection of a media asset for the marketing site gallery.
/// Storage keys and archive flags stay internal.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MediaAssetPublic {
    pub id: Uuid,
    pub media_kind: MediaKind,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<MediaAsset> for MediaAssetPublic {
    fn from(asset: MediaAsset) -> Self {
        MediaAssetPublic {
            id: asset.id,
            media_kind: asset.media_kind,
            title: asset.title,
            description: asset.description,
            url: asset.storage_url,
            uploaded_at: asset.uploaded_at,
        }
    }
}

/// Everything needed to record a freshly stored asset. Built by the upload
/// flow after the binary has been written to storage.
#[derive(Debug, Clone)]
pub struct NewMediaAsset {
    pub media_kind: MediaKind,
    pub title: String,
    pub description: Option<String>,
    pub filename: String,
    pub original_filename: String,
    pub content_type: String,
    pub file_size: i64,
    pub storage_backend: StorageBackend,
    pub storage_key: String,
    pub storage_url: String,
}

/// Partial update for a media asset. Omitted fields are left unchanged.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct MediaUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub is_archived: Option<bool>,
}

impl MediaUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.is_archived.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_projection_hides_storage_key() {
        let asset = MediaAsset {
            id: Uuid::new_v4(),
            media_kind: MediaKind::Photo,
            title: "Annual day".to_string(),
            description: None,
            filename: "abc.jpg".to_string(),
            original_filename: "annual-day.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            file_size: 1024,
            storage_backend: StorageBackend::Local,
            storage_key: "gallery/photos/abc.jpg".to_string(),
            storage_url: "http://localhost:4000/media/gallery/photos/abc.jpg".to_string(),
            is_archived: false,
            uploaded_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let public = MediaAssetPublic::from(asset);
        let json = serde_json::to_value(&public).expect("serialize");
        assert!(json.get("storage_key").is_none());
        assert!(json.get("is_archived").is_none());
        assert!(json.get("url").is_some());
    }

    #[test]
    fn media_kind_parses_case_insensitively() {
        assert_eq!("Photo".parse::<MediaKind>().ok(), Some(MediaKind::Photo));
        assert_eq!("VIDEO".parse::<MediaKind>().ok(), Some(MediaKind::Video));
        assert!("audio".parse::<MediaKind>().is_err());
    }

    #[test]
    fn empty_update_detected() {
        let update = MediaUpdate {
            title: None,
            description: None,
            is_archived: None,
        };
        assert!(update.is_empty());
    }
}
