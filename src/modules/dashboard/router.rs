use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{my_course, my_course_modules, my_courses, my_module_videos};

pub fn init_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(my_courses))
        .route("/courses/{course_id}", get(my_course))
        .route("/courses/{course_id}/modules", get(my_course_modules))
        .route("/modules/{module_id}/videos", get(my_module_videos))
}
