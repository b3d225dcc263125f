/// Comment model and database operations
///
/// Comments attach a user's note to a todo. They are immutable after
/// creation; the only mutation in scope is admin deletion.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE comments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     contents TEXT NOT NULL,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     todo_id UUID NOT NULL REFERENCES todos(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Comment record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID
    pub id: Uuid,

    /// Comment text
    pub contents: String,

    /// Author
    pub user_id: Uuid,

    /// Todo the comment belongs to
    pub todo_id: Uuid,

    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

/// Comment row joined with its author's public fields
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub contents: String,
    pub author_id: Uuid,
    pub author_email: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    pub contents: String,
    pub user_id: Uuid,
    pub todo_id: Uuid,
}

impl Comment {
    /// Creates a new comment
    ///
    /// Callers check that the todo exists first so a missing todo
    /// surfaces as "Todo not found" rather than a foreign-key error.
    pub async fn create(pool: &PgPool, data: CreateComment) -> Result<Self, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (contents, user_id, todo_id)
            VALUES ($1, $2, $3)
            RETURNING id, contents, user_id, todo_id, created_at
            "#,
        )
        .bind(data.contents)
        .bind(data.user_id)
        .bind(data.todo_id)
        .fetch_one(pool)
        .await?;

        Ok(comment)
    }

    /// Lists all comments for a todo with authors, in insertion order
    pub async fn list_by_todo_with_author(
        pool: &PgPool,
        todo_id: Uuid,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.contents,
                   u.id AS author_id, u.email AS author_email,
                   c.created_at
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.todo_id = $1
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(todo_id)
        .fetch_all(pool)
        .await?;

        Ok(comments)
    }

    /// Deletes a comment by ID (admin operation)
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
