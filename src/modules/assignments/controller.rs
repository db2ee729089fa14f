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
    Assignment, AssignmentComment, AssignmentWithComments, CreateAssignmentDto, CreateCommentDto,
    UpdateAssignmentDto,
};
use super::service::AssignmentService;

#[utoipa::path(
    get,
    path = "/api/assignments",
    params(ListParams),
    responses(
        (status = 200, description = "List of assignments", body = [Assignment])
    ),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn get_assignments(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Assignment>>, AppError> {
    let assignments = AssignmentService::get_assignments(&state.db, params).await?;
    Ok(Json(assignments))
}

#[utoipa::path(
    post,
    path = "/api/assignments",
    request_body = CreateAssignmentDto,
    responses(
        (status = 201, description = "Assignment created", body = Assignment),
        (status = 422, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Assignments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin, dto))]
pub async fn create_assignment(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(dto): ValidatedJson<CreateAssignmentDto>,
) -> Result<(StatusCode, Json<Assignment>), AppError> {
    let assignment = AssignmentService::create_assignment(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

#[utoipa::path(
    get,
    path = "/api/assignments/{id}",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment with its comments", body = AssignmentWithComments),
        (status = 404, description = "Assignment not found")
    ),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn get_assignment_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssignmentWithComments>, AppError> {
    let assignment = AssignmentService::get_assignment_by_id(&state.db, id).await?;
    Ok(Json(assignment))
}

#[utoipa::path(
    put,
    path = "/api/assignments/{id}",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    request_body = UpdateAssignmentDto,
    responses(
        (status = 200, description = "Assignment updated", body = Assignment),
        (status = 400, description = "Nothing to update"),
        (status = 404, description = "Assignment not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Assignments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin, dto))]
pub async fn update_assignment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAssignmentDto>,
) -> Result<Json<Assignment>, AppError> {
    let assignment = AssignmentService::update_assignment(&state.db, id, dto).await?;
    Ok(Json(assignment))
}

#[utoipa::path(
    delete,
    path = "/api/assignments/{id}",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment and its comments deleted"),
        (status = 404, description = "Assignment not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Assignments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn delete_assignment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    AssignmentService::delete_assignment(&state.db, id).await?;
    Ok(Json(json!({ "message": "Assignment deleted successfully" })))
}

#[utoipa::path(
    get,
    path = "/api/assignments/{id}/comments",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Comments on the assignment", body = [AssignmentComment]),
        (status = 404, description = "Assignment not found")
    ),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn get_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AssignmentComment>>, AppError> {
    let comments = AssignmentService::get_comments(&state.db, id).await?;
    Ok(Json(comments))
}

#[utoipa::path(
    post,
    path = "/api/assignments/{id}/comments",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment added", body = AssignmentComment),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Assignment not found")
    ),
    tag = "Assignments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn add_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<AssignmentComment>), AppError> {
    let comment =
        AssignmentService::add_comment(&state.db, id, auth_user.name(), &dto.text).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[utoipa::path(
    delete,
    path = "/api/assignments/comments/{comment_id}",
    params(("comment_id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 404, description = "Comment not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Assignments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn delete_comment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(comment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    AssignmentService::delete_comment(&state.db, comment_id).await?;
    Ok(Json(json!({ "message": "Comment deleted successfully" })))
}
