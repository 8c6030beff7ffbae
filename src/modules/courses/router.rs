use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_course, delete_course, get_course, get_courses, update_course};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_course).get(get_courses))
        .route(
            "/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
}
