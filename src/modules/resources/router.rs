use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use super::controller::{
    add_comment, create_resource, delete_comment, delete_resource, get_comments,
    get_resource_by_id, get_resources, update_resource,
};

pub fn init_resources_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_resources).post(create_resource))
        .route(
            "/{id}",
            get(get_resource_by_id)
                .put(update_resource)
                .delete(delete_resource),
        )
        .route("/{id}/comments", get(get_comments).post(add_comment))
        .route("/comments/{comment_id}", delete(delete_comment))
}
