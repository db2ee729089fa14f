use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{AdminUser, AuthUser};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::listing::ListParams;
use crate::validator::ValidatedJson;

use super::model::{CreateReplyDto, CreateTopicDto, Reply, Topic, TopicWithReplies, UpdateTopicDto};
use super::service::DiscussionService;

#[utoipa::path(
    get,
    path = "/api/discussion/topics",
    params(ListParams),
    responses(
        (status = 200, description = "List of discussion topics", body = [Topic])
    ),
    tag = "Discussion"
)]
#[instrument(skip(state))]
pub async fn get_topics(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Topic>>, AppError> {
    let topics = DiscussionService::get_topics(&state.db, params).await?;
    Ok(Json(topics))
}

#[utoipa::path(
    post,
    path = "/api/discussion/topics",
    request_body = CreateTopicDto,
    responses(
        (status = 201, description = "Topic created", body = Topic),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation error")
    ),
    tag = "Discussion",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_topic(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTopicDto>,
) -> Result<(StatusCode, Json<Topic>), AppError> {
    let topic = DiscussionService::create_topic(&state.db, auth_user.name(), dto).await?;
    Ok((StatusCode::CREATED, Json(topic)))
}

#[utoipa::path(
    get,
    path = "/api/discussion/topics/{id}",
    params(("id" = Uuid, Path, description = "Topic ID")),
    responses(
        (status = 200, description = "Topic with its replies", body = TopicWithReplies),
        (status = 404, description = "Topic not found")
    ),
    tag = "Discussion"
)]
#[instrument(skip(state))]
pub async fn get_topic_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TopicWithReplies>, AppError> {
    let topic = DiscussionService::get_topic_by_id(&state.db, id).await?;
    Ok(Json(topic))
}

#[utoipa::path(
    put,
    path = "/api/discussion/topics/{id}",
    params(("id" = Uuid, Path, description = "Topic ID")),
    request_body = UpdateTopicDto,
    responses(
        (status = 200, description = "Topic updated", body = Topic),
        (status = 400, description = "Nothing to update"),
        (status = 404, description = "Topic not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Discussion",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin, dto))]
pub async fn update_topic(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTopicDto>,
) -> Result<Json<Topic>, AppError> {
    let topic = DiscussionService::update_topic(&state.db, id, dto).await?;
    Ok(Json(topic))
}

#[utoipa::path(
    delete,
    path = "/api/discussion/topics/{id}",
    params(("id" = Uuid, Path, description = "Topic ID")),
    responses(
        (status = 200, description = "Topic and its replies deleted"),
        (status = 404, description = "Topic not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Discussion",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn delete_topic(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    DiscussionService::delete_topic(&state.db, id).await?;
    Ok(Json(json!({ "message": "Topic deleted successfully" })))
}

#[utoipa::path(
    get,
    path = "/api/discussion/topics/{id}/replies",
    params(("id" = Uuid, Path, description = "Topic ID")),
    responses(
        (status = 200, description = "Replies on the topic", body = [Reply]),
        (status = 404, description = "Topic not found")
    ),
    tag = "Discussion"
)]
#[instrument(skip(state))]
pub async fn get_replies(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Reply>>, AppError> {
    let replies = DiscussionService::get_replies(&state.db, id).await?;
    Ok(Json(replies))
}

#[utoipa::path(
    post,
    path = "/api/discussion/topics/{id}/replies",
    params(("id" = Uuid, Path, description = "Topic ID")),
    request_body = CreateReplyDto,
    responses(
        (status = 201, description = "Reply added", body = Reply),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Topic not found")
    ),
    tag = "Discussion",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn add_reply(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateReplyDto>,
) -> Result<(StatusCode, Json<Reply>), AppError> {
    let reply = DiscussionService::add_reply(&state.db, id, auth_user.name(), &dto.text).await?;
    Ok((StatusCode::CREATED, Json(reply)))
}

#[utoipa::path(
    delete,
    path = "/api/discussion/replies/{reply_id}",
    params(("reply_id" = Uuid, Path, description = "Reply ID")),
    responses(
        (status = 200, description = "Reply deleted"),
        (status = 404, description = "Reply not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Discussion",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn delete_reply(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(reply_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    DiscussionService::delete_reply(&state.db, reply_id).await?;
    Ok(Json(json!({ "message": "Reply deleted successfully" })))
}
