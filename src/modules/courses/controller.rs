use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::courses::model::{Course, CreateCourseDto, UpdateCourseDto};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Create a course
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 200, description = "Course created", body = Course),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::create_course(&state.db, state.cache.as_ref(), dto).await?;
    Ok(Json(course))
}

/// List all courses
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "List of courses", body = [Course]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::get_courses(&state.db, state.cache.as_ref()).await?;
    Ok(Json(courses))
}

/// Get a course by ID
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = Course),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::get_course_by_id(&state.db, id).await?;
    Ok(Json(course))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::update_course(&state.db, state.cache.as_ref(), id, dto).await?;
    Ok(Json(course))
}

/// Delete a course and everything it contains
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    CourseService::delete_course(&state.db, state.cache.as_ref(), id).await?;
    Ok(Json(json!({"message": "Course deleted successfully"})))
}
