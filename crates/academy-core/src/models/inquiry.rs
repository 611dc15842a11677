//! Inquiry domain model and lifecycle rules.
//!
//! An inquiry carries two independent axes of state: how far staff have taken
//! the review (`ReviewStage`) and what was decided (`EnrollmentStatus`). The
//! transition rules below are the single authority for which changes are legal;
//! repositories validate against them before touching the database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Review progress for an inquiry. Stages only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "review_stage", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStage {
    Unreviewed,
    InProgress,
    Completed,
}

impl ReviewStage {
    fn ordinal(self) -> u8 {
        match self {
            ReviewStage::Unreviewed => 0,
            ReviewStage::InProgress => 1,
            ReviewStage::Completed => 2,
        }
    }
}

/// Enrollment decision for an inquiry. `UnderReview` is the only non-terminal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "enrollment_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    UnderReview,
    NotEnrolled,
    Enrolled,
}

/// Preferred class delivery mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "class_mode", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum ClassMode {
    Online,
    Offline,
}

/// Admin-facing grouping of an inquiry, derived from both state axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InquiryBucket {
    UnderReview,
    NotEnrolled,
    Enrolled,
}

/// The combined lifecycle state of an inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleState {
    pub review: ReviewStage,
    pub status: EnrollmentStatus,
}

impl LifecycleState {
    pub fn new(review: ReviewStage, status: EnrollmentStatus) -> Self {
        Self { review, status }
    }

    /// State every freshly submitted inquiry starts in.
    pub fn initial() -> Self {
        Self {
            review: ReviewStage::Unreviewed,
            status: EnrollmentStatus::UnderReview,
        }
    }

    /// An inquiry counts as enrolled only when review is complete AND the
    /// decision is enrolled; an `Enrolled` status on an unfinished review is
    /// unreachable through `validate_status_change` but must still not count.
    pub fn bucket(&self) -> InquiryBucket {
        match (self.review, self.status) {
            (ReviewStage::Completed, EnrollmentStatus::Enrolled) => InquiryBucket::Enrolled,
            (_, EnrollmentStatus::NotEnrolled) => InquiryBucket::NotEnrolled,
            _ => InquiryBucket::UnderReview,
        }
    }

    /// Whether a terminal enrollment decision has been recorded.
    pub fn is_decided(&self) -> bool {
        self.status != EnrollmentStatus::UnderReview
    }

    /// Validate a review stage change. Stages are forward-only (skipping ahead
    /// is fine, going back is not) and frozen once a decision is recorded.
    /// Setting the current stage again is a no-op and allowed.
    pub fn validate_review_change(&self, to: ReviewStage) -> Result<(), AppError> {
        if self.is_decided() {
            return Err(AppError::InvalidTransition(format!(
                "cannot change review stage after an enrollment decision ({:?})",
                self.status
            )));
        }
        if to.ordinal() < self.review.ordinal() {
            return Err(AppError::InvalidTransition(format!(
                "review stage cannot move backwards ({:?} -> {:?})",
                self.review, to
            )));
        }
        Ok(())
    }

    /// Validate an enrollment status change. Decisions require a completed
    /// review, and a recorded decision cannot be changed or cleared.
    /// Re-setting `UnderReview` while undecided is a no-op and allowed.
    pub fn validate_status_change(&self, to: EnrollmentStatus) -> Result<(), AppError> {
        if self.is_decided() {
            return Err(AppError::InvalidTransition(format!(
                "enrollment decision already recorded ({:?})",
                self.status
            )));
        }
        match to {
            EnrollmentStatus::UnderReview => Ok(()),
            EnrollmentStatus::NotEnrolled | EnrollmentStatus::Enrolled => {
                if self.review != ReviewStage::Completed {
                    return Err(AppError::InvalidTransition(format!(
                        "enrollment decision requires a completed review (stage is {:?})",
                        self.review
                    )));
                }
                Ok(())
            }
        }
    }
}

/// A prospective student inquiry as stored in `student_inquiries`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Inquiry {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub class_mode: ClassMode,
    pub message: Option<String>,
    pub review_stage: ReviewStage,
    pub enrollment_status: EnrollmentStatus,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Inquiry {
    pub fn lifecycle(&self) -> LifecycleState {
        LifecycleState::new(self.review_stage, self.enrollment_status)
    }
}

/// Payload for the public inquiry form. Review and status are never accepted
/// from the client; every submission starts at `LifecycleState::initial()`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewInquiry {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 5, max = 32))]
    pub phone: String,
    #[validate(length(min = 1, max = 100))]
    pub course: String,
    pub class_mode: ClassMode,
    #[validate(length(max = 2000))]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_unreviewed_underreview() {
        let state = LifecycleState::initial();
        assert_eq!(state.review, ReviewStage::Unreviewed);
        assert_eq!(state.status, EnrollmentStatus::UnderReview);
        assert_eq!(state.bucket(), InquiryBucket::UnderReview);
    }

    #[test]
    fn review_stage_moves_forward_only() {
        let state = LifecycleState::new(ReviewStage::InProgress, EnrollmentStatus::UnderReview);
        assert!(state.validate_review_change(ReviewStage::Completed).is_ok());
        assert!(state.validate_review_change(ReviewStage::InProgress).is_ok());
        assert!(state
            .validate_review_change(ReviewStage::Unreviewed)
            .is_err());
    }

    #[test]
    fn review_stage_can_skip_ahead() {
        let state = LifecycleState::initial();
        assert!(state.validate_review_change(ReviewStage::Completed).is_ok());
    }

    #[test]
    fn decision_requires_completed_review() {
        let unreviewed = LifecycleState::initial();
        assert!(unreviewed
            .validate_status_change(EnrollmentStatus::Enrolled)
            .is_err());
        assert!(unreviewed
            .validate_status_change(EnrollmentStatus::NotEnrolled)
            .is_err());

        let completed =
            LifecycleState::new(ReviewStage::Completed, EnrollmentStatus::UnderReview);
        assert!(completed
            .validate_status_change(EnrollmentStatus::Enrolled)
            .is_ok());
        assert!(completed
            .validate_status_change(EnrollmentStatus::NotEnrolled)
            .is_ok());
    }

    #[test]
    fn decisions_are_terminal() {
        let declined =
            LifecycleState::new(ReviewStage::Completed, EnrollmentStatus::NotEnrolled);
        assert!(declined
            .validate_status_change(EnrollmentStatus::Enrolled)
            .is_err());
        assert!(declined
            .validate_status_change(EnrollmentStatus::UnderReview)
            .is_err());
        assert!(declined
            .validate_review_change(ReviewStage::Completed)
            .is_err());
    }

    #[test]
    fn enrolled_bucket_requires_completed_review() {
        let enrolled = LifecycleState::new(ReviewStage::Completed, EnrollmentStatus::Enrolled);
        assert_eq!(enrolled.bucket(), InquiryBucket::Enrolled);

        // Inconsistent state (should be unreachable); must not count as enrolled.
        let inconsistent =
            LifecycleState::new(ReviewStage::InProgress, EnrollmentStatus::Enrolled);
        assert_ne!(inconsistent.bucket(), InquiryBucket::Enrolled);
    }

    #[test]
    fn not_enrolled_bucket_from_status() {
        let declined =
            LifecycleState::new(ReviewStage::Completed, EnrollmentStatus::NotEnrolled);
        assert_eq!(declined.bucket(), InquiryBucket::NotEnrolled);
    }

    #[test]
    fn reaffirming_underreview_is_allowed_while_undecided() {
        let state = LifecycleState::new(ReviewStage::InProgress, EnrollmentStatus::UnderReview);
        assert!(state
            .validate_status_change(EnrollmentStatus::UnderReview)
            .is_ok());
    }
}
