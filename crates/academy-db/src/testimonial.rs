use academy_core::constants::MAX_LIST_RESULTS;
use academy_core::models::{
    NewTestimonial, Testimonial, TestimonialStatus, TestimonialUpdate,
};
use academy_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

#[derive(Clone)]
pub struct TestimonialRepository {
    pool: PgPool,
}

impl TestimonialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, new), fields(db.table = "testimonials", db.operation = "insert"))]
    pub async fn create(&self, new: &NewTestimonial) -> Result<Testimonial, AppError> {
        let id = Uuid::new_v4();

        let testimonial = sqlx::query_as::<Postgres, Testimonial>(
            r#"
            INSERT INTO testimonials (id, author_name, author_role, quote, status)
            VALUES ($1, $2, $3, $4, 'published')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&new.author_name)
        .bind(&new.author_role)
        .bind(&new.quote)
        .fetch_one(&self.pool)
        .await?;

        Ok(testimonial)
    }

    #[tracing::instrument(skip(self), fields(db.table = "testimonials", db.operation = "select"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Testimonial>, AppError> {
        let testimonial = sqlx::query_as::<Postgres, Testimonial>(
            "SELECT * FROM testimonials WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(testimonial)
    }

    #[tracing::instrument(skip(self), fields(db.table = "testimonials", db.operation = "select"))]
    pub async fn list(
        &self,
        status: Option<TestimonialStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Testimonial>, AppError> {
        let limit = limit.clamp(1, MAX_LIST_RESULTS);
        let offset = offset.max(0);

        let testimonials = sqlx::query_as::<Postgres, Testimonial>(
            r#"
            SELECT * FROM testimonials
            WHERE ($1::testimonial_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(testimonials)
    }

    /// Public listing. Archived testimonials are filtered out in the query.
    #[tracing::instrument(skip(self), fields(db.table = "testimonials", db.operation = "select"))]
    pub async fn list_published(&self, limit: i64, offset: i64) -> Result<Vec<Testimonial>, AppError> {
        self.list(Some(TestimonialStatus::Published), limit, offset)
            .await
    }

    #[tracing::instrument(skip(self, update), fields(db.table = "testimonials", db.operation = "update"))]
    pub async fn update(
        &self,
        id: Uuid,
        update: &TestimonialUpdate,
    ) -> Result<Testimonial, AppError> {
        if update.is_empty() {
            return Err(AppError::BadRequest("No fields to update".to_string()));
        }

        let testimonial = sqlx::query_as::<Postgres, Testimonial>(
            r#"
            UPDATE testimonials
            SET author_name = COALESCE($2, author_name),
                author_role = COALESCE($3, author_role),
                quote = COALESCE($4, quote),
                status = COALESCE($5, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.author_name)
        .bind(&update.author_role)
        .bind(&update.quote)
        .bind(update.status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Testimonial {} not found", id)))?;

        Ok(testimonial)
    }

    #[tracing::instrument(skip(self), fields(db.table = "testimonials", db.operation = "delete"))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
