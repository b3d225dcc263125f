/// Manager assignment endpoints
///
/// # Endpoints
///
/// - `POST /v1/todos/:todo_id/managers` - Assign a user as manager
/// - `GET /v1/todos/:todo_id/managers` - List a todo's managers
/// - `DELETE /v1/todos/:todo_id/managers/:manager_id` - Remove a manager
///
/// The precondition ladders run in a fixed order and the first failure
/// aborts the request; the pure checks live next to the model in the
/// shared crate.

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
use todostack_shared::models::manager::{
    check_assignment, check_removal, Manager, ManagerRuleError, ManagerWithUser,
};
use todostack_shared::models::todo::Todo;
use todostack_shared::models::user::User;

/// Assign manager request
#[derive(Debug, Deserialize)]
pub struct AssignManagerRequest {
    /// User to assign as manager
    pub manager_user_id: Uuid,
}

/// Assigned user projection nested in manager responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ManagerUserResponse {
    pub id: Uuid,
    pub email: String,
}

/// Manager projection
#[derive(Debug, Serialize, Deserialize)]
pub struct ManagerResponse {
    pub id: Uuid,
    pub user: ManagerUserResponse,
}

impl From<ManagerWithUser> for ManagerResponse {
    fn from(manager: ManagerWithUser) -> Self {
        Self {
            id: manager.id,
            user: ManagerUserResponse {
                id: manager.user_id,
                email: manager.user_email,
            },
        }
    }
}

/// Assign manager handler
///
/// # Errors
///
/// In evaluation order:
/// - 404 `"Todo not found"` when the todo is absent
/// - 400 `"일정을 생성한 유저만 담당자를 지정할 수 있습니다."` when the
///   todo has no owner
/// - 400 `"일정 작성자는 본인을 담당자로 등록할 수 없습니다."` when the
///   owner assigns themselves
/// - 404 `"User not found"` when the candidate does not resolve
pub async fn save_manager(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(todo_id): Path<Uuid>,
    Json(req): Json<AssignManagerRequest>,
) -> ApiResult<(StatusCode, Json<ManagerResponse>)> {
    let todo = Todo::find_by_id(&state.db, todo_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Todo not found".to_string()))?;

    check_assignment(&todo, auth.id, req.manager_user_id)?;

    let candidate = User::find_by_id(&state.db, req.manager_user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let manager = Manager::create(&state.db, candidate.id, todo.id).await?;

    tracing::info!(
        manager_id = %manager.id,
        todo_id = %todo.id,
        user_id = %candidate.id,
        "Manager assigned"
    );

    Ok((
        StatusCode::CREATED,
        Json(ManagerResponse {
            id: manager.id,
            user: ManagerUserResponse {
                id: candidate.id,
                email: candidate.email,
            },
        }),
    ))
}

/// List managers handler
///
/// # Errors
///
/// - 404 `"Todo not found"` when the todo is absent
pub async fn get_managers(
    State(state): State<AppState>,
    Path(todo_id): Path<Uuid>,
) -> ApiResult<Json<Vec<ManagerResponse>>> {
    Todo::find_by_id(&state.db, todo_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Todo not found".to_string()))?;

    let managers = Manager::list_by_todo_with_user(&state.db, todo_id).await?;

    Ok(Json(
        managers.into_iter().map(ManagerResponse::from).collect(),
    ))
}

/// Remove manager handler
///
/// # Errors
///
/// In evaluation order:
/// - 404 `"User not found"` when the caller's account vanished
/// - 404 `"Todo not found"` when the todo is absent
/// - 400 `"해당 일정을 만든 유저가 유효하지 않습니다"` when the todo has
///   no owner or the caller is not the owner
/// - 404 `"Manager not found"` when the manager id does not resolve
/// - 400 `"해당 일정에 등록된 담당자가 아닙니다"` when the manager row
///   belongs to a different todo
pub async fn delete_manager(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((todo_id, manager_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    let caller = User::find_by_id(&state.db, auth.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let todo = Todo::find_by_id(&state.db, todo_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Todo not found".to_string()))?;

    // Ownership check runs before the manager row is resolved.
    if todo.user_id != Some(caller.id) {
        return Err(ManagerRuleError::NotOwner.into());
    }

    let manager = Manager::find_by_id(&state.db, manager_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Manager not found".to_string()))?;

    check_removal(&todo, &manager, caller.id)?;

    Manager::delete(&state.db, manager.id).await?;

    tracing::info!(manager_id = %manager.id, todo_id = %todo.id, "Manager removed");

    Ok(StatusCode::NO_CONTENT)
}
