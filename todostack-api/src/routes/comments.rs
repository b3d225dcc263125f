/// Comment endpoints
///
/// # Endpoints
///
/// - `POST /v1/todos/:todo_id/comments` - Attach a comment to a todo
/// - `GET /v1/todos/:todo_id/comments` - List a todo's comments with
///   authors, in insertion order

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use todostack_shared::auth::middleware::AuthUser;
use todostack_shared::models::comment::{Comment, CommentWithAuthor, CreateComment};
use todostack_shared::models::todo::Todo;

/// Create comment request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Contents must not be empty"))]
    pub contents: String,
}

/// Author projection nested in comment responses
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub email: String,
}

/// Comment projection with its author
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub contents: String,
    pub author: AuthorResponse,
    pub created_at: DateTime<Utc>,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(comment: CommentWithAuthor) -> Self {
        Self {
            id: comment.id,
            contents: comment.contents,
            author: AuthorResponse {
                id: comment.author_id,
                email: comment.author_email,
            },
            created_at: comment.created_at,
        }
    }
}

/// Create comment handler
///
/// # Errors
///
/// - 404 `"Todo not found"` when the todo is absent
/// - 422 on empty contents
pub async fn save_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(todo_id): Path<Uuid>,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    req.validate().map_err(validation_error)?;

    Todo::find_by_id(&state.db, todo_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Todo not found".to_string()))?;

    let comment = Comment::create(
        &state.db,
        CreateComment {
            contents: req.contents,
            user_id: auth.id,
            todo_id,
        },
    )
    .await?;

    tracing::info!(comment_id = %comment.id, todo_id = %todo_id, "Comment created");

    Ok((
        StatusCode::CREATED,
        Json(CommentResponse {
            id: comment.id,
            contents: comment.contents,
            author: AuthorResponse {
                id: auth.id,
                email: auth.email,
            },
            created_at: comment.created_at,
        }),
    ))
}

/// List comments handler
///
/// Returns the todo's comments oldest first. Listing performs no todo
/// lookup: an unknown todo simply has no comments, so the result is an
/// empty list.
pub async fn get_comments(
    State(state): State<AppState>,
    Path(todo_id): Path<Uuid>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comments = Comment::list_by_todo_with_author(&state.db, todo_id).await?;

    Ok(Json(
        comments.into_iter().map(CommentResponse::from).collect(),
    ))
}
