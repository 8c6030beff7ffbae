use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_module, delete_module, get_course_modules, get_module, get_modules, update_module,
};

/// Flat module routes: the admin module library and per-module CRUD.
pub fn init_modules_router() -> Router<AppState> {
    Router::new().route("/", get(get_modules)).route(
        "/{id}",
        get(get_module).put(update_module).delete(delete_module),
    )
}

/// Routes nested under `/courses/{course_id}/modules`.
pub fn init_course_modules_router() -> Router<AppState> {
    Router::new().route("/", post(create_module).get(get_course_modules))
}
