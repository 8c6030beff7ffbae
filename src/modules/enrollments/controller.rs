use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::enrollments::model::{EnrollStudentDto, EnrolledCourse, Enrollment};
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Enroll a student in a course
#[utoipa::path(
    post,
    path = "/api/students/{student_id}/enrollments",
    params(("student_id" = Uuid, Path, description = "Student profile ID")),
    request_body = EnrollStudentDto,
    responses(
        (status = 200, description = "Enrollment created", body = Enrollment),
        (status = 400, description = "Already enrolled", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student or course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, dto))]
pub async fn enroll_student(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Json(dto): Json<EnrollStudentDto>,
) -> Result<Json<Enrollment>, AppError> {
    let enrollment = EnrollmentService::enroll(
        &state.db,
        state.cache.as_ref(),
        student_id,
        dto.course_id,
    )
    .await?;
    Ok(Json(enrollment))
}

/// List the courses a student is enrolled in
#[utoipa::path(
    get,
    path = "/api/students/{student_id}/enrollments",
    params(("student_id" = Uuid, Path, description = "Student profile ID")),
    responses(
        (status = 200, description = "Enrolled courses", body = [EnrolledCourse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn get_student_enrollments(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<EnrolledCourse>>, AppError> {
    let courses =
        EnrollmentService::courses_for_student(&state.db, state.cache.as_ref(), student_id).await?;
    Ok(Json(courses))
}

/// Remove a student from a course
#[utoipa::path(
    delete,
    path = "/api/students/{student_id}/enrollments/{course_id}",
    params(
        ("student_id" = Uuid, Path, description = "Student profile ID"),
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Enrollment removed"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn unenroll_student(
    State(state): State<AppState>,
    Path((student_id, course_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    EnrollmentService::unenroll(&state.db, state.cache.as_ref(), student_id, course_id).await?;
    Ok(Json(json!({"message": "Enrollment removed successfully"})))
}
