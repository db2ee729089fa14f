use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    change_password, create_student, delete_student, get_student_by_id, get_students,
    update_student,
};

/// Student management routes. The whole router is wrapped in the admin gate
/// when mounted.
pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_students).post(create_student))
        .route(
            "/{student_id}",
            get(get_student_by_id)
                .put(update_student)
                .delete(delete_student),
        )
        .route("/{student_id}/change-password", post(change_password))
}
