//! Public gallery handlers.
//!
//! These serve the marketing site and never require authentication. Archived
//! assets are filtered out in the database query; clients cannot opt back in.

use academy_core::constants::DEFAULT_PAGE_SIZE;
use academy_core::models::{MediaAssetPublic, MediaKind};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::HttpAppError;
use crate::state::MediaState;

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[utoipa::path(
    get,
    path = "/api/v0/gallery/photos",
    tag = "gallery",
    params(
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Published photos", body = Vec<MediaAssetPublic>)
    )
)]
#[tracing::instrument(skip(media), fields(operation = "list_gallery_photos"))]
pub async fn list_photos(
    State(media): State<MediaState>,
    Query(query): Query<GalleryQuery>,
) -> Result<Json<Vec<MediaAssetPublic>>, HttpAppError> {
    let assets = media
        .repository
        .list_public(MediaKind::Photo, query.limit, query.offset)
        .await?;
    Ok(Json(assets.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v0/gallery/videos",
    tag = "gallery",
    params(
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Published videos", body = Vec<MediaAssetPublic>)
    )
)]
#[tracing::instrument(skip(media), fields(operation = "list_gallery_videos"))]
pub async fn list_videos(
    State(media): State<MediaState>,
    Query(query): Query<GalleryQuery>,
) -> Result<Json<Vec<MediaAssetPublic>>, HttpAppError> {
    let assets = media
        .repository
        .list_public(MediaKind::Video, query.limit, query.offset)
        .await?;
    Ok(Json(assets.into_iter().map(Into::into).collect()))
}
