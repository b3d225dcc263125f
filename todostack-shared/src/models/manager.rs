/// Manager assignments and the rules that govern them
///
/// A manager row links a user to a todo as a responsible party, distinct
/// from the todo's owner. This module holds both the CRUD operations and
/// the pure precondition checks for assigning and removing managers —
/// the checks take already-fetched rows so they can be unit-tested
/// without a database.
///
/// # Rules
///
/// Assignment (`check_assignment`):
/// - the todo must have an owner;
/// - the owner may not assign themselves as manager of their own todo.
///   Any other caller/candidate combination passes; in particular a
///   non-owner caller is not rejected here (see DESIGN.md).
///
/// Removal (`check_removal`):
/// - the caller must be the todo's owner (a null owner also fails);
/// - the manager row must belong to the given todo.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE managers (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     todo_id UUID NOT NULL REFERENCES todos(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (user_id, todo_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::todo::Todo;

/// Why a manager assignment or removal was refused
///
/// The display strings are the exact messages surfaced to API clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManagerRuleError {
    /// The todo has no owner, so nobody can assign managers to it
    #[error("일정을 생성한 유저만 담당자를 지정할 수 있습니다.")]
    MissingOwner,

    /// The todo's creator tried to assign themselves
    #[error("일정 작성자는 본인을 담당자로 등록할 수 없습니다.")]
    SelfAssignment,

    /// Removal requested by someone other than the todo's owner
    #[error("해당 일정을 만든 유저가 유효하지 않습니다")]
    NotOwner,

    /// The manager row belongs to a different todo
    #[error("해당 일정에 등록된 담당자가 아닙니다")]
    NotManagerOfTodo,
}

/// Manager assignment record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Manager {
    /// Unique manager row ID
    pub id: Uuid,

    /// Assigned user
    pub user_id: Uuid,

    /// Todo the assignment is scoped to
    pub todo_id: Uuid,

    /// When the assignment was made
    pub created_at: DateTime<Utc>,
}

/// Manager row joined with the assigned user's public fields
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ManagerWithUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_email: String,
}

/// Checks the preconditions for assigning `candidate_id` as a manager
///
/// Only the creator is barred from self-assignment: the check fires when
/// the candidate is the caller AND the caller owns the todo.
pub fn check_assignment(
    todo: &Todo,
    caller_id: Uuid,
    candidate_id: Uuid,
) -> Result<(), ManagerRuleError> {
    let owner_id = todo.user_id.ok_or(ManagerRuleError::MissingOwner)?;

    if candidate_id == caller_id && owner_id == caller_id {
        return Err(ManagerRuleError::SelfAssignment);
    }

    Ok(())
}

/// Checks the preconditions for removing a manager row from a todo
///
/// Requires triple consistency: the caller owns the todo, the manager
/// row exists (callers resolve it first), and the row belongs to this
/// todo.
pub fn check_removal(
    todo: &Todo,
    manager: &Manager,
    caller_id: Uuid,
) -> Result<(), ManagerRuleError> {
    match todo.user_id {
        Some(owner_id) if owner_id == caller_id => {}
        _ => return Err(ManagerRuleError::NotOwner),
    }

    if manager.todo_id != todo.id {
        return Err(ManagerRuleError::NotManagerOfTodo);
    }

    Ok(())
}

impl Manager {
    /// Creates a new manager assignment
    pub async fn create(pool: &PgPool, user_id: Uuid, todo_id: Uuid) -> Result<Self, sqlx::Error> {
        let manager = sqlx::query_as::<_, Manager>(
            r#"
            INSERT INTO managers (user_id, todo_id)
            VALUES ($1, $2)
            RETURNING id, user_id, todo_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(todo_id)
        .fetch_one(pool)
        .await?;

        Ok(manager)
    }

    /// Finds a manager row by ID, `None` if absent
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let manager = sqlx::query_as::<_, Manager>(
            r#"
            SELECT id, user_id, todo_id, created_at
            FROM managers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(manager)
    }

    /// Lists all manager rows for a todo with the assigned users resolved
    pub async fn list_by_todo_with_user(
        pool: &PgPool,
        todo_id: Uuid,
    ) -> Result<Vec<ManagerWithUser>, sqlx::Error> {
        let managers = sqlx::query_as::<_, ManagerWithUser>(
            r#"
            SELECT m.id, u.id AS user_id, u.email AS user_email
            FROM managers m
            JOIN users u ON u.id = m.user_id
            WHERE m.todo_id = $1
            ORDER BY m.created_at ASC, m.id ASC
            "#,
        )
        .bind(todo_id)
        .fetch_all(pool)
        .await?;

        Ok(managers)
    }

    /// Deletes a manager row by ID
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM managers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn todo_owned_by(owner: Option<Uuid>) -> Todo {
        Todo {
            id: Uuid::new_v4(),
            title: "Test Title".to_string(),
            contents: "Test Contents".to_string(),
            weather: "Sunny".to_string(),
            user_id: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn manager_for(todo_id: Uuid, user_id: Uuid) -> Manager {
        Manager {
            id: Uuid::new_v4(),
            user_id,
            todo_id,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_assignment_rejects_missing_owner() {
        let todo = todo_owned_by(None);
        let caller = Uuid::new_v4();

        let err = check_assignment(&todo, caller, Uuid::new_v4()).unwrap_err();
        assert_eq!(err, ManagerRuleError::MissingOwner);
        assert_eq!(
            err.to_string(),
            "일정을 생성한 유저만 담당자를 지정할 수 있습니다."
        );
    }

    #[test]
    fn test_owner_cannot_self_assign() {
        let owner = Uuid::new_v4();
        let todo = todo_owned_by(Some(owner));

        let err = check_assignment(&todo, owner, owner).unwrap_err();
        assert_eq!(err, ManagerRuleError::SelfAssignment);
    }

    #[test]
    fn test_owner_may_assign_someone_else() {
        let owner = Uuid::new_v4();
        let todo = todo_owned_by(Some(owner));

        assert!(check_assignment(&todo, owner, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_non_owner_assigning_themselves_is_allowed() {
        // Only the creator is barred from self-assignment.
        let owner = Uuid::new_v4();
        let caller = Uuid::new_v4();
        let todo = todo_owned_by(Some(owner));

        assert!(check_assignment(&todo, caller, caller).is_ok());
    }

    #[test]
    fn test_removal_requires_ownership() {
        let owner = Uuid::new_v4();
        let todo = todo_owned_by(Some(owner));
        let manager = manager_for(todo.id, Uuid::new_v4());

        let err = check_removal(&todo, &manager, Uuid::new_v4()).unwrap_err();
        assert_eq!(err, ManagerRuleError::NotOwner);
        assert_eq!(err.to_string(), "해당 일정을 만든 유저가 유효하지 않습니다");
    }

    #[test]
    fn test_removal_rejects_null_owner() {
        let todo = todo_owned_by(None);
        let manager = manager_for(todo.id, Uuid::new_v4());

        let err = check_removal(&todo, &manager, Uuid::new_v4()).unwrap_err();
        assert_eq!(err, ManagerRuleError::NotOwner);
    }

    #[test]
    fn test_removal_rejects_manager_of_other_todo() {
        let owner = Uuid::new_v4();
        let todo = todo_owned_by(Some(owner));
        let manager = manager_for(Uuid::new_v4(), Uuid::new_v4());

        let err = check_removal(&todo, &manager, owner).unwrap_err();
        assert_eq!(err, ManagerRuleError::NotManagerOfTodo);
        assert_eq!(err.to_string(), "해당 일정에 등록된 담당자가 아닙니다");
    }

    #[test]
    fn test_removal_succeeds_for_owner_and_matching_todo() {
        let owner = Uuid::new_v4();
        let todo = todo_owned_by(Some(owner));
        let manager = manager_for(todo.id, Uuid::new_v4());

        assert!(check_removal(&todo, &manager, owner).is_ok());
    }
}
