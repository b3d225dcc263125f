/// User endpoints
///
/// # Endpoints
///
/// - `GET /v1/users/:id` - Look up a user's public fields
/// - `PUT /v1/users/password` - Change the caller's password
///
/// Both sit behind the JWT middleware.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use todostack_shared::auth::middleware::AuthUser;
use todostack_shared::auth::password::{
    check_password_change, hash_password, validate_password_rules,
};
use todostack_shared::models::user::User;

/// Public projection of a user
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Password change request
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Get user handler
///
/// # Errors
///
/// - 404 `"User not found"` when the id does not resolve
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from(user)))
}

/// Change password handler
///
/// The same-as-old check runs before the old-password check, so a
/// correct new password that matches the stored one fails with 400 even
/// when the supplied old password is wrong.
///
/// # Errors
///
/// - 400 when the new password violates the content rules
/// - 404 `"User not found"` when the caller's account vanished
/// - 400 `"새 비밀번호는 기존 비밀번호와 같을 수 없습니다."`
/// - 401 `"잘못된 비밀번호입니다."` when the old password does not verify
pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    validate_password_rules(&req.new_password).map_err(ApiError::BadRequest)?;

    let user = User::find_by_id(&state.db, auth.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    check_password_change(&req.old_password, &req.new_password, &user.password_hash)?;

    let new_hash = hash_password(&req.new_password)?;
    User::update_password(&state.db, user.id, &new_hash).await?;

    tracing::info!(user_id = %user.id, "Password changed");

    Ok(StatusCode::NO_CONTENT)
}
