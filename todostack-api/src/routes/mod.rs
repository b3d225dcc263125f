/// API route handlers
///
/// # Modules
///
/// - `health`: health check endpoint
/// - `auth`: signup and signin
/// - `users`: user lookup and password change
/// - `todos`: todo creation, listing, lookup
/// - `comments`: comments attached to todos
/// - `managers`: manager assignment and removal
/// - `admin`: role changes and comment deletion (admin only)

pub mod admin;
pub mod auth;
pub mod comments;
pub mod health;
pub mod managers;
pub mod todos;
pub mod users;
