//! Admin gating middleware.
//!
//! The portal has a single privilege split: regular users and course admins.
//! `require_admin` gates whole routers (the student-management area), while
//! the [`AdminUser`](crate::middleware::auth::AdminUser) extractor gates
//! individual mutation handlers inside otherwise-open routers.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Middleware that rejects non-admin callers with 403.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// let admin_routes = Router::new()
///     .route("/students", get(get_students))
///     .layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let auth_user = match AuthUser::from_request_parts(&mut parts, &state).await {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    if !auth_user.is_admin() {
        return AppError::forbidden(anyhow::anyhow!(
            "Access denied: only admins can access this endpoint"
        ))
        .into_response();
    }

    let req = Request::from_parts(parts, body);
    next.run(req).await
}
