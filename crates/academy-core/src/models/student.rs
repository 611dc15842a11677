//! Enrolled student model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::inquiry::ClassMode;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// An enrolled student. Created by promoting an inquiry whose review is
/// completed and whose decision is enrolled, or directly by an admin.
/// `inquiry_id` records provenance for promoted students (the inquiry row
/// itself no longer exists after promotion) and is NULL for direct creation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Student {
    pub id: Uuid,
    pub inquiry_id: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub class_mode: ClassMode,
    pub message: Option<String>,
    pub enrolled_at: DateTime<Utc>,
}

/// Payload for direct admin creation of a student.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewStudent {
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
