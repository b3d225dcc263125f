/// Todo model and database operations
///
/// A todo is a task record with a title, free-form contents, and a
/// weather string snapshotted from the external forecast source at
/// creation time. The owning user is set once at creation and is
/// nullable: if the owner account is deleted the todo survives with
/// `user_id = NULL` (the manager rules treat that as an invalid owner).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title TEXT NOT NULL,
///     contents TEXT NOT NULL,
///     weather TEXT NOT NULL,
///     user_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Largest page size `list_with_owner` will serve
pub const MAX_PAGE_SIZE: i64 = 100;

/// Todo record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    /// Unique todo ID
    pub id: Uuid,

    /// Title
    pub title: String,

    /// Free-form contents
    pub contents: String,

    /// Weather string captured when the todo was created
    pub weather: String,

    /// Owning user (None if the owner account was deleted)
    pub user_id: Option<Uuid>,

    /// When the todo was created
    pub created_at: DateTime<Utc>,

    /// When the todo was last modified
    pub updated_at: DateTime<Utc>,
}

/// Todo row joined with its owner's public fields
///
/// Produced by the `LEFT JOIN users` queries so listings and single
/// lookups resolve the owner in one round trip.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TodoWithOwner {
    pub id: Uuid,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub owner_id: Option<Uuid>,
    pub owner_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new todo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user_id: Uuid,
}

/// Converts a zero-indexed page number into a row offset
///
/// Saturates instead of overflowing so absurd page numbers simply return
/// an empty page.
pub fn page_offset(page: i64, size: i64) -> i64 {
    page.max(0).saturating_mul(size.max(0))
}

/// Clamps a requested page size into `1..=MAX_PAGE_SIZE`
pub fn clamp_page_size(size: i64) -> i64 {
    size.clamp(1, MAX_PAGE_SIZE)
}

impl Todo {
    /// Creates a new todo owned by `data.user_id`
    pub async fn create(pool: &PgPool, data: CreateTodo) -> Result<Self, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, contents, weather, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, contents, weather, user_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.contents)
        .bind(data.weather)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(todo)
    }

    /// Finds a todo by ID, `None` if absent
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, contents, weather, user_id, created_at, updated_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(todo)
    }

    /// Finds a todo with its owner eagerly resolved
    pub async fn find_by_id_with_owner(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<TodoWithOwner>, sqlx::Error> {
        let todo = sqlx::query_as::<_, TodoWithOwner>(
            r#"
            SELECT t.id, t.title, t.contents, t.weather,
                   u.id AS owner_id, u.email AS owner_email,
                   t.created_at, t.updated_at
            FROM todos t
            LEFT JOIN users u ON u.id = t.user_id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(todo)
    }

    /// Lists todos with owners, most recently modified first
    ///
    /// `page` is zero-indexed; `size` is clamped to `1..=MAX_PAGE_SIZE`.
    pub async fn list_with_owner(
        pool: &PgPool,
        page: i64,
        size: i64,
    ) -> Result<Vec<TodoWithOwner>, sqlx::Error> {
        let size = clamp_page_size(size);
        let offset = page_offset(page, size);

        let todos = sqlx::query_as::<_, TodoWithOwner>(
            r#"
            SELECT t.id, t.title, t.contents, t.weather,
                   u.id AS owner_id, u.email AS owner_email,
                   t.created_at, t.updated_at
            FROM todos t
            LEFT JOIN users u ON u.id = t.user_id
            ORDER BY t.updated_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(size)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(todos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset_zero_indexed() {
        assert_eq!(page_offset(0, 10), 0);
        assert_eq!(page_offset(1, 10), 10);
        assert_eq!(page_offset(3, 25), 75);
    }

    #[test]
    fn test_page_offset_negative_page_clamped() {
        assert_eq!(page_offset(-1, 10), 0);
    }

    #[test]
    fn test_page_offset_saturates() {
        assert_eq!(page_offset(i64::MAX, 2), i64::MAX);
    }

    #[test]
    fn test_clamp_page_size() {
        assert_eq!(clamp_page_size(0), 1);
        assert_eq!(clamp_page_size(-5), 1);
        assert_eq!(clamp_page_size(10), 10);
        assert_eq!(clamp_page_size(10_000), MAX_PAGE_SIZE);
    }
}
