use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::course_modules::model::CourseModule;
use crate::modules::courses::model::Course;
use crate::modules::dashboard::service::DashboardService;
use crate::modules::enrollments::model::EnrolledCourse;
use crate::modules::profiles::model::Role;
use crate::modules::videos::model::Video;
use crate::state::AppState;
use crate::utils::errors::AppError;

fn caller(auth_user: &AuthUser) -> Result<(Uuid, Role), AppError> {
    let profile_id = auth_user.profile_id()?;
    let role = auth_user
        .role()
        .ok_or_else(|| AppError::forbidden("Access denied. Unknown role."))?;
    Ok((profile_id, role))
}

/// List the caller's enrolled courses
#[utoipa::path(
    get,
    path = "/api/dashboard/courses",
    responses(
        (status = 200, description = "Enrolled courses", body = [EnrolledCourse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Dashboard"
)]
#[instrument(skip(state, auth_user))]
pub async fn my_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<EnrolledCourse>>, AppError> {
    let (profile_id, _) = caller(&auth_user)?;
    let courses =
        DashboardService::enrolled_courses(&state.db, state.cache.as_ref(), profile_id).await?;
    Ok(Json(courses))
}

/// Get one of the caller's courses
#[utoipa::path(
    get,
    path = "/api/dashboard/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = Course),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not enrolled in this course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Dashboard"
)]
#[instrument(skip(state, auth_user))]
pub async fn my_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let (profile_id, role) = caller(&auth_user)?;
    let course = DashboardService::course(&state.db, profile_id, role, course_id).await?;
    Ok(Json(course))
}

/// List the modules of one of the caller's courses
#[utoipa::path(
    get,
    path = "/api/dashboard/courses/{course_id}/modules",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Modules in display order", body = [CourseModule]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not enrolled in this course", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Dashboard"
)]
#[instrument(skip(state, auth_user))]
pub async fn my_course_modules(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Vec<CourseModule>>, AppError> {
    let (profile_id, role) = caller(&auth_user)?;
    let modules = DashboardService::course_modules(
        &state.db,
        state.cache.as_ref(),
        profile_id,
        role,
        course_id,
    )
    .await?;
    Ok(Json(modules))
}

/// List the videos of a module in one of the caller's courses
#[utoipa::path(
    get,
    path = "/api/dashboard/modules/{module_id}/videos",
    params(("module_id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Videos in the module", body = [Video]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not enrolled in the owning course", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Dashboard"
)]
#[instrument(skip(state, auth_user))]
pub async fn my_module_videos(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(module_id): Path<Uuid>,
) -> Result<Json<Vec<Video>>, AppError> {
    let (profile_id, role) = caller(&auth_user)?;
    let videos = DashboardService::module_videos(
        &state.db,
        state.cache.as_ref(),
        profile_id,
        role,
        module_id,
    )
    .await?;
    Ok(Json(videos))
}
