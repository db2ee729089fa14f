use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use super::controller::{
    add_reply, create_topic, delete_reply, delete_topic, get_replies, get_topic_by_id, get_topics,
    update_topic,
};

pub fn init_discussion_router() -> Router<AppState> {
    Router::new()
        .route("/topics", get(get_topics).post(create_topic))
        .route(
            "/topics/{id}",
            get(get_topic_by_id).put(update_topic).delete(delete_topic),
        )
        .route("/topics/{id}/replies", get(get_replies).post(add_reply))
        .route("/replies/{reply_id}", delete(delete_reply))
}
