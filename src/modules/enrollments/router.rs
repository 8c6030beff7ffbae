use axum::{
    Router,
    routing::{delete, post},
};

use crate::state::AppState;

use super::controller::{enroll_student, get_student_enrollments, unenroll_student};

/// Routes nested under `/students/{student_id}/enrollments`.
pub fn init_student_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(enroll_student).get(get_student_enrollments))
        .route("/{course_id}", delete(unenroll_student))
}
