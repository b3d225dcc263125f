/// Admin endpoints
///
/// # Endpoints
///
/// - `PATCH /v1/admin/users/:id/role` - Change a user's role
/// - `DELETE /v1/admin/comments/:id` - Delete any comment
///
/// The whole subtree sits behind the JWT middleware, the admin-role
/// guard, and the audit middleware; handlers here can assume the caller
/// is an authenticated admin.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use todostack_shared::models::comment::Comment;
use todostack_shared::models::user::{User, UserRole};

/// Role change request
#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    /// New role (`USER` or `ADMIN`)
    pub role: UserRole,
}

/// Role change response
#[derive(Debug, Serialize, Deserialize)]
pub struct ChangeRoleResponse {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

/// Change user role handler
///
/// # Errors
///
/// - 404 `"User not found"` when the id does not resolve
pub async fn change_user_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ChangeRoleRequest>,
) -> ApiResult<Json<ChangeRoleResponse>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    User::update_role(&state.db, user.id, req.role).await?;

    tracing::info!(user_id = %user.id, role = %req.role, "User role changed");

    Ok(Json(ChangeRoleResponse {
        id: user.id,
        email: user.email,
        role: req.role,
    }))
}

/// Delete comment handler
///
/// # Errors
///
/// - 404 `"Comment not found"` when the id does not resolve
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Comment::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Comment not found".to_string()));
    }

    tracing::info!(comment_id = %id, "Comment deleted by admin");

    Ok(StatusCode::NO_CONTENT)
}
