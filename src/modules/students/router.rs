use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_student, delete_student, get_student, get_students, import_students, preview_import,
    update_student,
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student).get(get_students))
        .route("/import", post(import_students))
        .route("/import/preview", post(preview_import))
        .route(
            "/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}
