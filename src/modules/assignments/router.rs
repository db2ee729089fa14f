use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use super::controller::{
    add_comment, create_assignment, delete_assignment, delete_comment, get_assignment_by_id,
    get_assignments, get_comments, update_assignment,
};

pub fn init_assignments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_assignments).post(create_assignment))
        .route(
            "/{id}",
            get(get_assignment_by_id)
                .put(update_assignment)
                .delete(delete_assignment),
        )
        .route("/{id}/comments", get(get_comments).post(add_comment))
        .route("/comments/{comment_id}", delete(delete_comment))
}
