use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_video, delete_video, get_module_videos, get_video, get_videos, update_video,
};

/// Flat video routes: the admin video library and per-video CRUD.
pub fn init_videos_router() -> Router<AppState> {
    Router::new().route("/", get(get_videos)).route(
        "/{id}",
        get(get_video).put(update_video).delete(delete_video),
    )
}

/// Routes nested under `/modules/{module_id}/videos`.
pub fn init_module_videos_router() -> Router<AppState> {
    Router::new().route("/", post(create_video).get(get_module_videos))
}
