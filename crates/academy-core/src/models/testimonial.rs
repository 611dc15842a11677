//! Testimonial models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Publication state of a testimonial. Archived entries stay in the database
/// but never appear on the public site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "testimonial_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum TestimonialStatus {
    Published,
    Archived,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Testimonial {
    pub id: Uuid,
    pub author_name: String,
    pub author_role: Option<String>,
    pub quote: String,
    pub status: TestimonialStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewTestimonial {
    #[validate(length(min = 1, max = 200))]
    pub author_name: String,
    #[validate(length(max = 200))]
    pub author_role: Option<String>,
    #[validate(length(min = 1, max = 4000))]
    pub quote: String,
}

/// Partial update for a testimonial. Omitted fields are left unchanged.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TestimonialUpdate {
    #[validate(length(min = 1, max = 200))]
    pub author_name: Option<String>,
    #[validate(length(max = 200))]
    pub author_role: Option<String>,
    #[validate(length(min = 1, max = 4000))]
    pub quote: Option<String>,
    pub status: Option<TestimonialStatus>,
}

impl TestimonialUpdate {
    pub fn is_empty(&self) -> bool {
        self.author_name.is_none()
            && self.author_role.is_none()
            && self.quote.is_none()
            && self.status.is_none()
    }
}
