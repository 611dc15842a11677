use academy_core::constants::MAX_LIST_RESULTS;
use academy_core::models::{
    EnrollmentStatus, Inquiry, NewInquiry, ReviewStage, Student,
};
use academy_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Result of an enrollment decision.
///
/// `Promoted` means the inquiry was copied into `students` and its row deleted;
/// the inquiry id is no longer addressable afterwards.
#[derive(Debug)]
pub enum EnrollmentOutcome {
    Updated(Inquiry),
    Promoted(Student),
}

/// Repository for prospective student inquiries.
///
/// All state changes are validated against `LifecycleState` and run inside a
/// transaction with the row locked, so concurrent admin actions cannot record
/// conflicting decisions or promote the same inquiry twice.
#[derive(Clone)]
pub struct InquiryRepository {
    pool: PgPool,
}

impl InquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, new), fields(db.table = "student_inquiries", db.operation = "insert"))]
    pub async fn create(&self, new: &NewInquiry) -> Result<Inquiry, AppError> {
        let id = Uuid::new_v4();

        let inquiry: Inquiry = sqlx::query_as::<Postgres, Inquiry>(
            r#"
            INSERT INTO student_inquiries (
                id, full_name, email, phone, course, class_mode, message,
                review_stage, enrollment_status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'unreviewed', 'underreview')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.course)
        .bind(new.class_mode)
        .bind(&new.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(inquiry)
    }

    #[tracing::instrument(skip(self), fields(db.table = "student_inquiries", db.operation = "select"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Inquiry>, AppError> {
        let inquiry = sqlx::query_as::<Postgres, Inquiry>(
            "SELECT * FROM student_inquiries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(inquiry)
    }

    /// List inquiries, newest first, optionally filtered by either state axis.
    #[tracing::instrument(skip(self), fields(db.table = "student_inquiries", db.operation = "select"))]
    pub async fn list(
        &self,
        review_stage: Option<ReviewStage>,
        enrollment_status: Option<EnrollmentStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Inquiry>, AppError> {
        let limit = limit.clamp(1, MAX_LIST_RESULTS);
        let offset = offset.max(0);

        let inquiries = sqlx::query_as::<Postgres, Inquiry>(
            r#"
            SELECT * FROM student_inquiries
            WHERE ($1::review_stage IS NULL OR review_stage = $1)
              AND ($2::enrollment_status IS NULL OR enrollment_status = $2)
            ORDER BY submitted_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(review_stage)
        .bind(enrollment_status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(inquiries)
    }

    /// Advance the review stage. The row is locked for the duration of the
    /// transition check so a concurrent decision cannot slip in between.
    #[tracing::instrument(skip(self), fields(db.table = "student_inquiries", db.operation = "update"))]
    pub async fn set_review_stage(
        &self,
        id: Uuid,
        to: ReviewStage,
    ) -> Result<Inquiry, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<Postgres, Inquiry>(
            "SELECT * FROM student_inquiries WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Inquiry {} not found", id)))?;

        current.lifecycle().validate_review_change(to)?;

        let updated = sqlx::query_as::<Postgres, Inquiry>(
            r#"
            UPDATE student_inquiries
            SET review_stage = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(to)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            inquiry_id = %id,
            from = ?current.review_stage,
            to = ?to,
            "Review stage updated"
        );

        Ok(updated)
    }

    /// Record an enrollment decision.
    ///
    /// For `Enrolled` this performs the promotion: copy the inquiry into
    /// `students` and delete the inquiry row, all within one transaction so the
    /// two tables can never disagree. The row lock makes the decision
    /// effectively once-only under concurrency.
    #[tracing::instrument(skip(self), fields(db.table = "student_inquiries", db.operation = "update"))]
    pub async fn set_enrollment_status(
        &self,
        id: Uuid,
        to: EnrollmentStatus,
    ) -> Result<EnrollmentOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<Postgres, Inquiry>(
            "SELECT * FROM student_inquiries WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Inquiry {} not found", id)))?;

        current.lifecycle().validate_status_change(to)?;

        if to == EnrollmentStatus::Enrolled {
            let student_id = Uuid::new_v4();
            let student = sqlx::query_as::<Postgres, Student>(
                r#"
                INSERT INTO students (
                    id, inquiry_id, full_name, email, phone, course, class_mode, message
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
                "#,
            )
            .bind(student_id)
            .bind(current.id)
            .bind(&current.full_name)
            .bind(&current.email)
            .bind(&current.phone)
            .bind(&current.course)
            .bind(current.class_mode)
            .bind(&current.message)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query("DELETE FROM student_inquiries WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            tx.commit().await?;

            tracing::info!(
                inquiry_id = %id,
                student_id = %student.id,
                "Inquiry promoted to student"
            );

            return Ok(EnrollmentOutcome::Promoted(student));
        }

        let updated = sqlx::query_as::<Postgres, Inquiry>(
            r#"
            UPDATE student_inquiries
            SET enrollment_status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(to)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            inquiry_id = %id,
            from = ?current.enrollment_status,
            to = ?to,
            "Enrollment status updated"
        );

        Ok(EnrollmentOutcome::Updated(updated))
    }

    #[tracing::instrument(skip(self), fields(db.table = "student_inquiries", db.operation = "delete"))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM student_inquiries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
