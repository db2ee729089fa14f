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
    CreateCommentDto, CreateResourceDto, Resource, ResourceComment, ResourceWithComments,
    UpdateResourceDto,
};
use super::service::ResourceService;

#[utoipa::path(
    get,
    path = "/api/resources",
    params(ListParams),
    responses(
        (status = 200, description = "List of resources", body = [Resource])
    ),
    tag = "Resources"
)]
#[instrument(skip(state))]
pub async fn get_resources(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Resource>>, AppError> {
    let resources = ResourceService::get_resources(&state.db, params).await?;
    Ok(Json(resources))
}

#[utoipa::path(
    post,
    path = "/api/resources",
    request_body = CreateResourceDto,
    responses(
        (status = 201, description = "Resource created", body = Resource),
        (status = 422, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Resources",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin, dto))]
pub async fn create_resource(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(dto): ValidatedJson<CreateResourceDto>,
) -> Result<(StatusCode, Json<Resource>), AppError> {
    let resource = ResourceService::create_resource(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

#[utoipa::path(
    get,
    path = "/api/resources/{id}",
    params(("id" = Uuid, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Resource with its comments", body = ResourceWithComments),
        (status = 404, description = "Resource not found")
    ),
    tag = "Resources"
)]
#[instrument(skip(state))]
pub async fn get_resource_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResourceWithComments>, AppError> {
    let resource = ResourceService::get_resource_by_id(&state.db, id).await?;
    Ok(Json(resource))
}

#[utoipa::path(
    put,
    path = "/api/resources/{id}",
    params(("id" = Uuid, Path, description = "Resource ID")),
    request_body = UpdateResourceDto,
    responses(
        (status = 200, description = "Resource updated", body = Resource),
        (status = 400, description = "Nothing to update"),
        (status = 404, description = "Resource not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Resources",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin, dto))]
pub async fn update_resource(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateResourceDto>,
) -> Result<Json<Resource>, AppError> {
    let resource = ResourceService::update_resource(&state.db, id, dto).await?;
    Ok(Json(resource))
}

#[utoipa::path(
    delete,
    path = "/api/resources/{id}",
    params(("id" = Uuid, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Resource and its comments deleted"),
        (status = 404, description = "Resource not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Resources",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn delete_resource(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    ResourceService::delete_resource(&state.db, id).await?;
    Ok(Json(json!({ "message": "Resource deleted successfully" })))
}

#[utoipa::path(
    get,
    path = "/api/resources/{id}/comments",
    params(("id" = Uuid, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Comments on the resource", body = [ResourceComment]),
        (status = 404, description = "Resource not found")
    ),
    tag = "Resources"
)]
#[instrument(skip(state))]
pub async fn get_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ResourceComment>>, AppError> {
    let comments = ResourceService::get_comments(&state.db, id).await?;
    Ok(Json(comments))
}

#[utoipa::path(
    post,
    path = "/api/resources/{id}/comments",
    params(("id" = Uuid, Path, description = "Resource ID")),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment added", body = ResourceComment),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Resource not found")
    ),
    tag = "Resources",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn add_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<ResourceComment>), AppError> {
    let comment =
        ResourceService::add_comment(&state.db, id, auth_user.name(), &dto.text).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[utoipa::path(
    delete,
    path = "/api/resources/comments/{comment_id}",
    params(("comment_id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 404, description = "Comment not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Resources",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn delete_comment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(comment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    ResourceService::delete_comment(&state.db, comment_id).await?;
    Ok(Json(json!({ "message": "Comment deleted successfully" })))
}
