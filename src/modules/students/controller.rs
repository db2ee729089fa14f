use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::instrument;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::listing::ListParams;
use crate::validator::ValidatedJson;

use super::model::{ChangePasswordDto, CreateStudentDto, Student, UpdateStudentDto};
use super::service::StudentService;

#[utoipa::path(
    get,
    path = "/api/students",
    params(ListParams),
    responses(
        (status = 200, description = "List of students", body = [Student]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::get_students(&state.db, params).await?;
    Ok(Json(students))
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 409, description = "Duplicate student ID or email"),
        (status = 422, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = StudentService::create_student(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/api/students/{student_id}",
    params(("student_id" = String, Path, description = "University student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_by_id(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student_by_id(&state.db, &student_id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/api/students/{student_id}",
    params(("student_id" = String, Path, description = "University student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Nothing to update"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Duplicate student ID or email"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(&state.db, &student_id, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/students/{student_id}",
    params(("student_id" = String, Path, description = "University student ID")),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 404, description = "Student not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    StudentService::delete_student(&state.db, &student_id).await?;
    Ok(Json(json!({ "message": "Student deleted successfully" })))
}

#[utoipa::path(
    post,
    path = "/api/students/{student_id}/change-password",
    params(("student_id" = String, Path, description = "University student ID")),
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed"),
        (status = 401, description = "Current password is incorrect"),
        (status = 404, description = "Student not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn change_password(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<ChangePasswordDto>,
) -> Result<Json<Value>, AppError> {
    StudentService::change_password(&state.db, &student_id, dto).await?;
    Ok(Json(json!({ "message": "Password changed successfully" })))
}
