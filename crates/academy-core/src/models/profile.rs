//! Academy profile model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// The academy's public profile. A single row, always addressed by
/// `constants::PROFILE_ROW_ID`.
///
/// `founder_bios` is a JSON array of `{ name, title, bio }` objects and
/// `social_links` a JSON object of `platform -> url`; both are stored as JSONB
/// and passed through verbatim.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct AcademyProfile {
    pub id: Uuid,
    pub academy_name: String,
    pub tagline: Option<String>,
    pub about: Option<String>,
    #[schema(value_type = Object)]
    pub founder_bios: JsonValue,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    #[schema(value_type = Object)]
    pub social_links: JsonValue,
    pub updated_at: DateTime<Utc>,
}

/// Full replacement payload for the profile. Upserted into the singleton row.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 200))]
    pub academy_name: String,
    #[validate(length(max = 500))]
    pub tagline: Option<String>,
    #[validate(length(max = 10000))]
    pub about: Option<String>,
    #[serde(default = "default_founder_bios")]
    #[schema(value_type = Object)]
    pub founder_bios: JsonValue,
    #[validate(email)]
    pub contact_email: Option<String>,
    #[validate(length(max = 32))]
    pub contact_phone: Option<String>,
    #[validate(length(max = 1000))]
    pub address: Option<String>,
    #[serde(default = "default_social_links")]
    #[schema(value_type = Object)]
    pub social_links: JsonValue,
}

fn default_founder_bios() -> JsonValue {
    JsonValue::Array(Vec::new())
}

fn default_social_links() -> JsonValue {
    serde_json::json!({})
}
