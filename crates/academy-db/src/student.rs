use academy_core::constants::MAX_LIST_RESULTS;
use academy_core::models::{NewStudent, Student};
use academy_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for enrolled students.
///
/// Rows come from inquiry promotion (which inserts inside its own
/// transaction, see `InquiryRepository`) or from direct admin creation here.
#[derive(Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Direct admin creation. `inquiry_id` stays NULL; only promotion sets it.
    #[tracing::instrument(skip(self, new), fields(db.table = "students", db.operation = "insert"))]
    pub async fn create(&self, new: &NewStudent) -> Result<Student, AppError> {
        let student = sqlx::query_as::<Postgres, Student>(
            r#"
            INSERT INTO students (id, inquiry_id, full_name, email, phone, course, class_mode, message)
            VALUES ($1, NULL, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.course)
        .bind(new.class_mode)
        .bind(&new.message)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(student_id = %student.id, "Student created");

        Ok(student)
    }

    #[tracing::instrument(skip(self), fields(db.table = "students", db.operation = "select"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Student>, AppError> {
        let student =
            sqlx::query_as::<Postgres, Student>("SELECT * FROM students WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(student)
    }

    #[tracing::instrument(skip(self), fields(db.table = "students", db.operation = "select"))]
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Student>, AppError> {
        let limit = limit.clamp(1, MAX_LIST_RESULTS);
        let offset = offset.max(0);

        let students = sqlx::query_as::<Postgres, Student>(
            "SELECT * FROM students ORDER BY enrolled_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    #[tracing::instrument(skip(self), fields(db.table = "students", db.operation = "delete"))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
