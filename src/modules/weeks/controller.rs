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

use super::model::{
    CreateCommentDto, CreateWeekDto, UpdateWeekDto, Week, WeekComment, WeekWithComments,
};
use super::service::WeekService;

#[utoipa::path(
    get,
    path = "/api/weeks",
    params(ListParams),
    responses(
        (status = 200, description = "Weekly course breakdown", body = [Week])
    ),
    tag = "Weeks"
)]
#[instrument(skip(state))]
pub async fn get_weeks(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Week>>, AppError> {
    let weeks = WeekService::get_weeks(&state.db, params).await?;
    Ok(Json(weeks))
}

#[utoipa::path(
    post,
    path = "/api/weeks",
    request_body = CreateWeekDto,
    responses(
        (status = 201, description = "Week created", body = Week),
        (status = 422, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Weeks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin, dto))]
pub async fn create_week(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(dto): ValidatedJson<CreateWeekDto>,
) -> Result<(StatusCode, Json<Week>), AppError> {
    let week = WeekService::create_week(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(week)))
}

#[utoipa::path(
    get,
    path = "/api/weeks/{id}",
    params(("id" = Uuid, Path, description = "Week ID")),
    responses(
        (status = 200, description = "Week with its comments", body = WeekWithComments),
        (status = 404, description = "Week not found")
    ),
    tag = "Weeks"
)]
#[instrument(skip(state))]
pub async fn get_week_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WeekWithComments>, AppError> {
    let week = WeekService::get_week_by_id(&state.db, id).await?;
    Ok(Json(week))
}

#[utoipa::path(
    put,
    path = "/api/weeks/{id}",
    params(("id" = Uuid, Path, description = "Week ID")),
    request_body = UpdateWeekDto,
    responses(
        (status = 200, description = "Week updated", body = Week),
        (status = 400, description = "Nothing to update"),
        (status = 404, description = "Week not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Weeks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin, dto))]
pub async fn update_week(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateWeekDto>,
) -> Result<Json<Week>, AppError> {
    let week = WeekService::update_week(&state.db, id, dto).await?;
    Ok(Json(week))
}

#[utoipa::path(
    delete,
    path = "/api/weeks/{id}",
    params(("id" = Uuid, Path, description = "Week ID")),
    responses(
        (status = 200, description = "Week and its comments deleted"),
        (status = 404, description = "Week not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Weeks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn delete_week(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    WeekService::delete_week(&state.db, id).await?;
    Ok(Json(json!({ "message": "Week deleted successfully" })))
}

#[utoipa::path(
    get,
    path = "/api/weeks/{id}/comments",
    params(("id" = Uuid, Path, description = "Week ID")),
    responses(
        (status = 200, description = "Comments on the week", body = [WeekComment]),
        (status = 404, description = "Week not found")
    ),
    tag = "Weeks"
)]
#[instrument(skip(state))]
pub async fn get_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<WeekComment>>, AppError> {
    let comments = WeekService::get_comments(&state.db, id).await?;
    Ok(Json(comments))
}

#[utoipa::path(
    post,
    path = "/api/weeks/{id}/comments",
    params(("id" = Uuid, Path, description = "Week ID")),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment added", body = WeekComment),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Week not found")
    ),
    tag = "Weeks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn add_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<WeekComment>), AppError> {
    let comment = WeekService::add_comment(&state.db, id, auth_user.name(), &dto.text).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[utoipa::path(
    delete,
    path = "/api/weeks/comments/{comment_id}",
    params(("comment_id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 404, description = "Comment not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Weeks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn delete_comment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(comment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    WeekService::delete_comment(&state.db, comment_id).await?;
    Ok(Json(json!({ "message": "Comment deleted successfully" })))
}
