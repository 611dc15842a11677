//! Student handlers (admin only).

use std::sync::Arc;

use academy_core::constants::DEFAULT_PAGE_SIZE;
use academy_core::models::{NewStudent, Student};
use academy_core::AppError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListStudentsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[utoipa::path(
    get,
    path = "/api/v0/admin/students",
    tag = "students",
    params(
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Students", body = Vec<Student>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_students"))]
pub async fn list_students(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListStudentsQuery>,
) -> Result<Json<Vec<Student>>, HttpAppError> {
    let students = state.db.students.list(query.limit, query.offset).await?;
    Ok(Json(students))
}

/// Direct admin creation of a student, outside the inquiry workflow.
/// The record carries no inquiry back-reference.
#[utoipa::path(
    post,
    path = "/api/v0/admin/students",
    tag = "students",
    request_body = NewStudent,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, new), fields(operation = "create_student"))]
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    ValidatedJson(new): ValidatedJson<NewStudent>,
) -> Result<(StatusCode, Json<Student>), HttpAppError> {
    new.validate().map_err(HttpAppError::from)?;

    let student = state.db.students.create(&new).await?;

    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/api/v0/admin/students/{id}",
    tag = "students",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(student_id = %id, operation = "get_student"))]
pub async fn get_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, HttpAppError> {
    let student = state
        .db
        .students
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {} not found", id)))?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/v0/admin/students/{id}",
    tag = "students",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(student_id = %id, operation = "delete_student"))]
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    if !state.db.students.delete(id).await? {
        return Err(AppError::NotFound(format!("Student {} not found", id)).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
