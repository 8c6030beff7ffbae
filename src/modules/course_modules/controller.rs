use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::course_modules::model::{CourseModule, CreateModuleDto, UpdateModuleDto};
use crate::modules::course_modules::service::ModuleService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Create a module at the end of a course
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/modules",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    request_body = CreateModuleDto,
    responses(
        (status = 200, description = "Module created", body = CourseModule),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Modules"
)]
#[instrument(skip(state, dto))]
pub async fn create_module(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateModuleDto>,
) -> Result<Json<CourseModule>, AppError> {
    let module =
        ModuleService::create_module(&state.db, state.cache.as_ref(), course_id, dto).await?;
    Ok(Json(module))
}

/// List a course's modules in display order
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/modules",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Modules in the course", body = [CourseModule]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Modules"
)]
#[instrument(skip(state))]
pub async fn get_course_modules(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Vec<CourseModule>>, AppError> {
    let modules =
        ModuleService::get_modules_by_course(&state.db, state.cache.as_ref(), course_id).await?;
    Ok(Json(modules))
}

/// List all modules across courses
#[utoipa::path(
    get,
    path = "/api/modules",
    responses(
        (status = 200, description = "All modules", body = [CourseModule]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Modules"
)]
#[instrument(skip(state))]
pub async fn get_modules(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseModule>>, AppError> {
    let modules = ModuleService::get_all_modules(&state.db, state.cache.as_ref()).await?;
    Ok(Json(modules))
}

/// Get a module by ID
#[utoipa::path(
    get,
    path = "/api/modules/{id}",
    params(("id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Module details", body = CourseModule),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Modules"
)]
#[instrument(skip(state))]
pub async fn get_module(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseModule>, AppError> {
    let module = ModuleService::get_module_by_id(&state.db, id).await?;
    Ok(Json(module))
}

/// Update a module's title or position
#[utoipa::path(
    put,
    path = "/api/modules/{id}",
    params(("id" = Uuid, Path, description = "Module ID")),
    request_body = UpdateModuleDto,
    responses(
        (status = 200, description = "Module updated", body = CourseModule),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Modules"
)]
#[instrument(skip(state, dto))]
pub async fn update_module(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateModuleDto>,
) -> Result<Json<CourseModule>, AppError> {
    let module = ModuleService::update_module(&state.db, state.cache.as_ref(), id, dto).await?;
    Ok(Json(module))
}

/// Delete a module and its videos
#[utoipa::path(
    delete,
    path = "/api/modules/{id}",
    params(("id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Module deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Modules"
)]
#[instrument(skip(state))]
pub async fn delete_module(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    ModuleService::delete_module(&state.db, state.cache.as_ref(), id).await?;
    Ok(Json(json!({"message": "Module deleted successfully"})))
}
