use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::videos::model::{CreateVideoDto, UpdateVideoDto, Video};
use crate::modules::videos::service::VideoService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Add a video to a module
#[utoipa::path(
    post,
    path = "/api/modules/{module_id}/videos",
    params(("module_id" = Uuid, Path, description = "Module ID")),
    request_body = CreateVideoDto,
    responses(
        (status = 200, description = "Video created", body = Video),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Videos"
)]
#[instrument(skip(state, dto))]
pub async fn create_video(
    State(state): State<AppState>,
    Path(module_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateVideoDto>,
) -> Result<Json<Video>, AppError> {
    let video = VideoService::create_video(&state.db, state.cache.as_ref(), module_id, dto).await?;
    Ok(Json(video))
}

/// List a module's videos
#[utoipa::path(
    get,
    path = "/api/modules/{module_id}/videos",
    params(("module_id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Videos in the module", body = [Video]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Videos"
)]
#[instrument(skip(state))]
pub async fn get_module_videos(
    State(state): State<AppState>,
    Path(module_id): Path<Uuid>,
) -> Result<Json<Vec<Video>>, AppError> {
    let videos =
        VideoService::get_videos_by_module(&state.db, state.cache.as_ref(), module_id).await?;
    Ok(Json(videos))
}

/// List all videos across modules
#[utoipa::path(
    get,
    path = "/api/videos",
    responses(
        (status = 200, description = "All videos", body = [Video]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Videos"
)]
#[instrument(skip(state))]
pub async fn get_videos(State(state): State<AppState>) -> Result<Json<Vec<Video>>, AppError> {
    let videos = VideoService::get_all_videos(&state.db, state.cache.as_ref()).await?;
    Ok(Json(videos))
}

/// Get a video by ID
#[utoipa::path(
    get,
    path = "/api/videos/{id}",
    params(("id" = Uuid, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video details", body = Video),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Videos"
)]
#[instrument(skip(state))]
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Video>, AppError> {
    let video = VideoService::get_video_by_id(&state.db, id).await?;
    Ok(Json(video))
}

/// Update a video
#[utoipa::path(
    put,
    path = "/api/videos/{id}",
    params(("id" = Uuid, Path, description = "Video ID")),
    request_body = UpdateVideoDto,
    responses(
        (status = 200, description = "Video updated", body = Video),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Videos"
)]
#[instrument(skip(state, dto))]
pub async fn update_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateVideoDto>,
) -> Result<Json<Video>, AppError> {
    let video = VideoService::update_video(&state.db, state.cache.as_ref(), id, dto).await?;
    Ok(Json(video))
}

/// Delete a video
#[utoipa::path(
    delete,
    path = "/api/videos/{id}",
    params(("id" = Uuid, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Videos"
)]
#[instrument(skip(state))]
pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    VideoService::delete_video(&state.db, state.cache.as_ref(), id).await?;
    Ok(Json(json!({"message": "Video deleted successfully"})))
}
