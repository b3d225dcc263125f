/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id hashing, password rules, change-password check
/// - [`jwt`]: bearer token issuance and validation (HS256)
/// - [`middleware`]: axum middleware deriving [`middleware::AuthUser`]
///   from the token, plus the admin-role guard
///
/// # Example
///
/// ```no_run
/// use todostack_shared::auth::jwt::{create_token, Claims};
/// use todostack_shared::auth::password::{hash_password, verify_password};
/// use todostack_shared::models::user::UserRole;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("Secret1234")?;
/// assert!(verify_password("Secret1234", &hash)?);
///
/// let claims = Claims::new(Uuid::new_v4(), "a@a.com".to_string(), UserRole::User);
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
