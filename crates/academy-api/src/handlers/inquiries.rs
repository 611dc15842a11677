//! Inquiry handlers: public submission and admin review workflow.

use std::sync::Arc;

use academy_core::constants::DEFAULT_PAGE_SIZE;
use academy_core::models::{
    EnrollmentStatus, Inquiry, InquiryBucket, NewInquiry, ReviewStage, Student,
};
use academy_core::AppError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListInquiriesQuery {
    pub review_stage: Option<ReviewStage>,
    pub enrollment_status: Option<EnrollmentStatus>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewStageUpdate {
    pub review_stage: ReviewStage,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EnrollmentStatusUpdate {
    pub enrollment_status: EnrollmentStatus,
}

/// Admin view of an inquiry: the stored row plus its derived bucket, so the
/// console can group rows without re-deriving the lifecycle rules.
#[derive(Debug, Serialize, ToSchema)]
pub struct InquiryView {
    #[serde(flatten)]
    pub inquiry: Inquiry,
    pub bucket: InquiryBucket,
}

impl From<Inquiry> for InquiryView {
    fn from(inquiry: Inquiry) -> Self {
        let bucket = inquiry.lifecycle().bucket();
        Self { inquiry, bucket }
    }
}

/// Result of an enrollment decision. A `promoted` outcome means the inquiry
/// row is gone and the student record is the new source of truth.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum EnrollmentDecisionResponse {
    Updated { inquiry: Inquiry },
    Promoted { student: Student },
}

/// Public inquiry submission from the marketing site contact form.
///
/// Clients cannot set review or enrollment state; every inquiry starts
/// unreviewed and under review.
#[utoipa::path(
    post,
    path = "/api/v0/inquiries",
    tag = "inquiries",
    request_body = NewInquiry,
    responses(
        (status = 201, description = "Inquiry submitted", body = Inquiry),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, new), fields(operation = "submit_inquiry"))]
pub async fn submit_inquiry(
    State(state): State<Arc<AppState>>,
    ValidatedJson(new): ValidatedJson<NewInquiry>,
) -> Result<impl IntoResponse, HttpAppError> {
    new.validate().map_err(HttpAppError::from)?;

    let inquiry = state.db.inquiries.create(&new).await?;

    tracing::info!(inquiry_id = %inquiry.id, course = %inquiry.course, "Inquiry submitted");

    // Best-effort notifications; SMTP failures never fail the submission.
    if let Some(email) = &state.email {
        email.notify_inquiry_submitted(&inquiry);
    }

    Ok((StatusCode::CREATED, Json(inquiry)))
}

#[utoipa::path(
    get,
    path = "/api/v0/admin/inquiries",
    tag = "inquiries",
    params(
        ("review_stage" = Option<ReviewStage>, Query, description = "Filter by review stage"),
        ("enrollment_status" = Option<EnrollmentStatus>, Query, description = "Filter by enrollment status"),
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Inquiries", body = Vec<InquiryView>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_inquiries"))]
pub async fn list_inquiries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListInquiriesQuery>,
) -> Result<Json<Vec<InquiryView>>, HttpAppError> {
    let inquiries = state
        .db
        .inquiries
        .list(
            query.review_stage,
            query.enrollment_status,
            query.limit,
            query.offset,
        )
        .await?;
    Ok(Json(inquiries.into_iter().map(InquiryView::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v0/admin/inquiries/{id}",
    tag = "inquiries",
    params(("id" = Uuid, Path, description = "Inquiry ID")),
    responses(
        (status = 200, description = "Inquiry", body = InquiryView),
        (status = 404, description = "Inquiry not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(inquiry_id = %id, operation = "get_inquiry"))]
pub async fn get_inquiry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<InquiryView>, HttpAppError> {
    let inquiry = state
        .db
        .inquiries
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Inquiry {} not found", id)))?;
    Ok(Json(InquiryView::from(inquiry)))
}

/// Advance the review stage. Stages only move forward and freeze once an
/// enrollment decision has been recorded.
#[utoipa::path(
    put,
    path = "/api/v0/admin/inquiries/{id}/review",
    tag = "inquiries",
    params(("id" = Uuid, Path, description = "Inquiry ID")),
    request_body = ReviewStageUpdate,
    responses(
        (status = 200, description = "Review stage updated", body = InquiryView),
        (status = 404, description = "Inquiry not found", body = ErrorResponse),
        (status = 409, description = "Transition not allowed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, update), fields(inquiry_id = %id, operation = "set_review_stage"))]
pub async fn set_review_stage(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(update): ValidatedJson<ReviewStageUpdate>,
) -> Result<Json<InquiryView>, HttpAppError> {
    let inquiry = state
        .db
        .inquiries
        .set_review_stage(id, update.review_stage)
        .await?;
    Ok(Json(InquiryView::from(inquiry)))
}

/// Record an enrollment decision.
///
/// `enrolled` promotes the inquiry: the contact data is copied into the
/// students table and the inquiry row is deleted, atomically.
#[utoipa::path(
    put,
    path = "/api/v0/admin/inquiries/{id}/status",
    tag = "inquiries",
    params(("id" = Uuid, Path, description = "Inquiry ID")),
    request_body = EnrollmentStatusUpdate,
    responses(
        (status = 200, description = "Decision recorded", body = EnrollmentDecisionResponse),
        (status = 404, description = "Inquiry not found", body = ErrorResponse),
        (status = 409, description = "Transition not allowed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, update), fields(inquiry_id = %id, operation = "set_enrollment_status"))]
pub async fn set_enrollment_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(update): ValidatedJson<EnrollmentStatusUpdate>,
) -> Result<Json<EnrollmentDecisionResponse>, HttpAppError> {
    let outcome = state
        .db
        .inquiries
        .set_enrollment_status(id, update.enrollment_status)
        .await?;

    let response = match outcome {
        academy_db::EnrollmentOutcome::Updated(inquiry) => {
            EnrollmentDecisionResponse::Updated { inquiry }
        }
        academy_db::EnrollmentOutcome::Promoted(student) => {
            EnrollmentDecisionResponse::Promoted { student }
        }
    };
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/v0/admin/inquiries/{id}",
    tag = "inquiries",
    params(("id" = Uuid, Path, description = "Inquiry ID")),
    responses(
        (status = 204, description = "Inquiry deleted"),
        (status = 404, description = "Inquiry not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(inquiry_id = %id, operation = "delete_inquiry"))]
pub async fn delete_inquiry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    if !state.db.inquiries.delete(id).await? {
        return Err(AppError::NotFound(format!("Inquiry {} not found", id)).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::models::ClassMode;
    use chrono::Utc;

    fn inquiry(review: ReviewStage, status: EnrollmentStatus) -> Inquiry {
        Inquiry {
            id: Uuid::new_v4(),
            full_name: "Priya Nair".to_string(),
            email: "priya@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            course: "Bharatanatyam".to_string(),
            class_mode: ClassMode::Offline,
            message: None,
            review_stage: review,
            enrollment_status: status,
            submitted_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn inquiry_view_carries_derived_bucket() {
        let view = InquiryView::from(inquiry(
            ReviewStage::Completed,
            EnrollmentStatus::NotEnrolled,
        ));
        assert_eq!(view.bucket, InquiryBucket::NotEnrolled);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["bucket"], "notenrolled");
        // Flattened row fields sit next to the bucket.
        assert_eq!(json["full_name"], "Priya Nair");
        assert_eq!(json["review_stage"], "completed");
    }

    #[test]
    fn fresh_inquiry_view_is_underreview() {
        let view = InquiryView::from(inquiry(
            ReviewStage::Unreviewed,
            EnrollmentStatus::UnderReview,
        ));
        assert_eq!(view.bucket, InquiryBucket::UnderReview);
    }
}
