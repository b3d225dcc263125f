/// Todo endpoints
///
/// # Endpoints
///
/// - `POST /v1/todos` - Create a todo (snapshots today's weather)
/// - `GET /v1/todos?page=&size=` - Paginated listing, newest first
/// - `GET /v1/todos/:todo_id` - Single todo with owner resolved
///
/// Creation fetches the weather before touching the database: if the
/// upstream feed is down the request fails with 503 and nothing is
/// stored.

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use todostack_shared::auth::middleware::AuthUser;
use todostack_shared::models::todo::{CreateTodo, Todo, TodoWithOwner};

/// Create todo request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Contents must not be empty"))]
    pub contents: String,
}

/// Pagination query parameters (zero-indexed page)
#[derive(Debug, Deserialize)]
pub struct ListTodosQuery {
    #[serde(default)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    pub size: i64,
}

fn default_page_size() -> i64 {
    10
}

/// Response for a freshly created todo
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedTodoResponse {
    pub id: Uuid,
    pub title: String,
    pub contents: String,
    pub weather: String,
}

/// Full todo projection with the owner's email
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: Uuid,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub owner_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TodoWithOwner> for TodoResponse {
    fn from(todo: TodoWithOwner) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            owner_email: todo.owner_email,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

/// Create todo handler
///
/// # Errors
///
/// - 422 on invalid title/contents
/// - 503 when the weather source is unreachable
pub async fn save_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateTodoRequest>,
) -> ApiResult<(StatusCode, Json<CreatedTodoResponse>)> {
    req.validate().map_err(validation_error)?;

    let weather = state.weather.today().await?;

    let todo = Todo::create(
        &state.db,
        CreateTodo {
            title: req.title,
            contents: req.contents,
            weather,
            user_id: auth.id,
        },
    )
    .await?;

    tracing::info!(todo_id = %todo.id, user_id = %auth.id, "Todo created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedTodoResponse {
            id: todo.id,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
        }),
    ))
}

/// List todos handler
///
/// `page` is zero-indexed; `size` is clamped server-side. Ordered by
/// `updated_at` descending.
pub async fn get_todos(
    State(state): State<AppState>,
    Query(query): Query<ListTodosQuery>,
) -> ApiResult<Json<Vec<TodoResponse>>> {
    let todos = Todo::list_with_owner(&state.db, query.page, query.size).await?;

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// Get todo handler
///
/// # Errors
///
/// - 404 `"Todo not found"` when the id does not resolve
pub async fn get_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<Uuid>,
) -> ApiResult<Json<TodoResponse>> {
    let todo = Todo::find_by_id_with_owner(&state.db, todo_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Todo not found".to_string()))?;

    Ok(Json(TodoResponse::from(todo)))
}
