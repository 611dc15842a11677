//! Academy profile handlers.
//!
//! The profile is a singleton row. The public endpoint serves it to the
//! marketing site; the admin endpoint replaces it wholesale.

use std::sync::Arc;

use academy_core::models::{AcademyProfile, ProfileUpdate};
use academy_core::AppError;
use axum::{extract::State, Json};
use validator::Validate;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::{AppState, ContentState};

#[utoipa::path(
    get,
    path = "/api/v0/profile",
    tag = "profile",
    responses(
        (status = 200, description = "Academy profile", body = AcademyProfile),
        (status = 404, description = "Profile not configured yet", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(content), fields(operation = "get_profile"))]
pub async fn get_profile(
    State(content): State<ContentState>,
) -> Result<Json<AcademyProfile>, HttpAppError> {
    let profile = content
        .profile
        .get()
        .await?
        .ok_or_else(|| AppError::NotFound("Academy profile not configured".to_string()))?;
    Ok(Json(profile))
}

/// Replace the profile. The first write creates the row.
#[utoipa::path(
    put,
    path = "/api/v0/admin/profile",
    tag = "profile",
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Profile saved", body = AcademyProfile),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, update), fields(operation = "put_profile"))]
pub async fn put_profile(
    State(state): State<Arc<AppState>>,
    ValidatedJson(update): ValidatedJson<ProfileUpdate>,
) -> Result<Json<AcademyProfile>, HttpAppError> {
    update.validate().map_err(HttpAppError::from)?;
    let profile = state.content.profile.upsert(&update).await?;
    Ok(Json(profile))
}
