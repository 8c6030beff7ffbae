use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::profiles::model::Profile;
use crate::modules::students::import::{self, ImportPreview, ImportReport};
use crate::modules::students::model::{CreateStudentDto, UpdateStudentDto};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Create a student account
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 200, description = "Student created", body = Profile),
        (status = 400, description = "Email already in use", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<Json<Profile>, AppError> {
    let student = StudentService::create_student(&state.db, state.cache.as_ref(), dto).await?;
    Ok(Json(student))
}

/// List all students
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "List of students", body = [Profile]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(State(state): State<AppState>) -> Result<Json<Vec<Profile>>, AppError> {
    let students = StudentService::get_students(&state.db, state.cache.as_ref()).await?;
    Ok(Json(students))
}

/// Get a student by ID
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student profile ID")),
    responses(
        (status = 200, description = "Student details", body = Profile),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Profile>, AppError> {
    let student = StudentService::get_student_by_id(&state.db, id).await?;
    Ok(Json(student))
}

/// Update a student
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student profile ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Profile),
        (status = 400, description = "Email already in use", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Profile>, AppError> {
    let student = StudentService::update_student(&state.db, state.cache.as_ref(), id, dto).await?;
    Ok(Json(student))
}

/// Delete a student and their enrollments
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student profile ID")),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    StudentService::delete_student(&state.db, state.cache.as_ref(), id).await?;
    Ok(Json(json!({"message": "Student deleted successfully"})))
}

/// Validate a CSV document without importing anything
#[utoipa::path(
    post,
    path = "/api/students/import/preview",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Per-row validation result", body = ImportPreview),
        (status = 400, description = "Malformed CSV", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Students"
)]
#[instrument(skip(body))]
pub async fn preview_import(body: String) -> Result<Json<ImportPreview>, AppError> {
    Ok(Json(import::preview(&body)?))
}

/// Import students from a CSV document
#[utoipa::path(
    post,
    path = "/api/students/import",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Per-row import outcome", body = ImportReport),
        (status = 400, description = "Malformed CSV", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Students"
)]
#[instrument(skip(state, body))]
pub async fn import_students(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportReport>, AppError> {
    let report = import::run_import(&state.db, state.cache.as_ref(), &body).await?;
    Ok(Json(report))
}
