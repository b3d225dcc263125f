/// Database models for TodoStack
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and roles
/// - `todo`: Todo records with weather snapshots and paginated listing
/// - `comment`: Comments attached to todos
/// - `manager`: Manager assignments plus the assignment/removal rules
///
/// # Example
///
/// ```no_run
/// use todostack_shared::models::user::{CreateUser, User, UserRole};
/// # use sqlx::PgPool;
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, CreateUser {
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     role: UserRole::User,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod comment;
pub mod manager;
pub mod todo;
pub mod user;
