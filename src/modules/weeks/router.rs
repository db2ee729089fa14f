use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use super::controller::{
    add_comment, create_week, delete_comment, delete_week, get_comments, get_week_by_id,
    get_weeks, update_week,
};

pub fn init_weeks_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_weeks).post(create_week))
        .route(
            "/{id}",
            get(get_week_by_id).put(update_week).delete(delete_week),
        )
        .route("/{id}/comments", get(get_comments).post(add_comment))
        .route("/comments/{comment_id}", delete(delete_comment))
}
