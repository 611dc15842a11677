use academy_core::constants::PROFILE_ROW_ID;
use academy_core::models::{AcademyProfile, ProfileUpdate};
use academy_core::AppError;
use sqlx::{PgPool, Postgres};

/// Repository for the academy profile.
///
/// The profile is a single row with a fixed id; updates upsert it so the
/// first write creates the row.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "academy_profile", db.operation = "select"))]
    pub async fn get(&self) -> Result<Option<AcademyProfile>, AppError> {
        let profile = sqlx::query_as::<Postgres, AcademyProfile>(
            "SELECT * FROM academy_profile WHERE id = $1",
        )
        .bind(PROFILE_ROW_ID)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    #[tracing::instrument(skip(self, update), fields(db.table = "academy_profile", db.operation = "upsert"))]
    pub async fn upsert(&self, update: &ProfileUpdate) -> Result<AcademyProfile, AppError> {
        let profile = sqlx::query_as::<Postgres, AcademyProfile>(
            r#"
            INSERT INTO academy_profile (
                id, academy_name, tagline, about, founder_bios,
                contact_email, contact_phone, address, social_links
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                academy_name = EXCLUDED.academy_name,
                tagline = EXCLUDED.tagline,
                about = EXCLUDED.about,
                founder_bios = EXCLUDED.founder_bios,
                contact_email = EXCLUDED.contact_email,
                contact_phone = EXCLUDED.contact_phone,
                address = EXCLUDED.address,
                social_links = EXCLUDED.social_links,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(PROFILE_ROW_ID)
        .bind(&update.academy_name)
        .bind(&update.tagline)
        .bind(&update.about)
        .bind(&update.founder_bios)
        .bind(&update.contact_email)
        .bind(&update.contact_phone)
        .bind(&update.address)
        .bind(&update.social_links)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }
}
