//! Testimonial handlers: public listing plus admin CRUD.

use std::sync::Arc;

use academy_core::constants::DEFAULT_PAGE_SIZE;
use academy_core::models::{
    NewTestimonial, Testimonial, TestimonialStatus, TestimonialUpdate,
};
use academy_core::AppError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::{AppState, ContentState};

#[derive(Debug, Deserialize)]
pub struct ListTestimonialsQuery {
    pub status: Option<TestimonialStatus>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Public listing. Only published testimonials, filtered server-side.
#[utoipa::path(
    get,
    path = "/api/v0/testimonials",
    tag = "testimonials",
    params(
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Published testimonials", body = Vec<Testimonial>)
    )
)]
#[tracing::instrument(skip(content), fields(operation = "list_published_testimonials"))]
pub async fn list_published(
    State(content): State<ContentState>,
    Query(query): Query<ListTestimonialsQuery>,
) -> Result<Json<Vec<Testimonial>>, HttpAppError> {
    let testimonials = content
        .testimonials
        .list_published(query.limit, query.offset)
        .await?;
    Ok(Json(testimonials))
}

#[utoipa::path(
    get,
    path = "/api/v0/admin/testimonials",
    tag = "testimonials",
    params(
        ("status" = Option<TestimonialStatus>, Query, description = "Filter by status"),
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Testimonials", body = Vec<Testimonial>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_testimonials"))]
pub async fn list_testimonials(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTestimonialsQuery>,
) -> Result<Json<Vec<Testimonial>>, HttpAppError> {
    let testimonials = state
        .content
        .testimonials
        .list(query.status, query.limit, query.offset)
        .await?;
    Ok(Json(testimonials))
}

#[utoipa::path(
    post,
    path = "/api/v0/admin/testimonials",
    tag = "testimonials",
    request_body = NewTestimonial,
    responses(
        (status = 201, description = "Testimonial created", body = Testimonial),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, new), fields(operation = "create_testimonial"))]
pub async fn create_testimonial(
    State(state): State<Arc<AppState>>,
    ValidatedJson(new): ValidatedJson<NewTestimonial>,
) -> Result<impl IntoResponse, HttpAppError> {
    new.validate().map_err(HttpAppError::from)?;
    let testimonial = state.content.testimonials.create(&new).await?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

#[utoipa::path(
    put,
    path = "/api/v0/admin/testimonials/{id}",
    tag = "testimonials",
    params(("id" = Uuid, Path, description = "Testimonial ID")),
    request_body = TestimonialUpdate,
    responses(
        (status = 200, description = "Testimonial updated", body = Testimonial),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Testimonial not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, update), fields(testimonial_id = %id, operation = "update_testimonial"))]
pub async fn update_testimonial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(update): ValidatedJson<TestimonialUpdate>,
) -> Result<Json<Testimonial>, HttpAppError> {
    update.validate().map_err(HttpAppError::from)?;
    let testimonial = state.content.testimonials.update(id, &update).await?;
    Ok(Json(testimonial))
}

#[utoipa::path(
    delete,
    path = "/api/v0/admin/testimonials/{id}",
    tag = "testimonials",
    params(("id" = Uuid, Path, description = "Testimonial ID")),
    responses(
        (status = 204, description = "Testimonial deleted"),
        (status = 404, description = "Testimonial not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(testimonial_id = %id, operation = "delete_testimonial"))]
pub async fn delete_testimonial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    if !state.content.testimonials.delete(id).await? {
        return Err(AppError::NotFound(format!("Testimonial {} not found", id)).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
