/// JWT token issuance and validation
///
/// TodoStack issues a single bearer token at signup/signin, signed with
/// HS256 and carrying the caller's id, email, and role. Handlers never
/// read the token themselves; the auth middleware validates it and
/// derives an [`AuthUser`](super::middleware::AuthUser) for rule
/// evaluation.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: 24 hours
/// - **Validation**: signature, expiration, not-before, and issuer checks
/// - **Secret**: at least 32 bytes, from `JWT_SECRET`
///
/// # Example
///
/// ```
/// use todostack_shared::auth::jwt::{create_token, validate_token, Claims};
/// use todostack_shared::models::user::UserRole;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::new(Uuid::new_v4(), "a@a.com".to_string(), UserRole::User);
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!")?;
///
/// let validated = validate_token(&token, "secret-key-at-least-32-bytes-long!")?;
/// assert_eq!(validated.sub, claims.sub);
/// assert_eq!(validated.email, "a@a.com");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::UserRole;

/// Issuer claim baked into every token
const ISSUER: &str = "todostack";

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Invalid issuer
    #[error("Invalid token issuer")]
    InvalidIssuer,
}

/// JWT claims
///
/// # Standard claims
///
/// - `sub`: user ID
/// - `iss`: always "todostack"
/// - `iat` / `exp` / `nbf`: issued-at, expiration, not-before
///
/// # Custom claims
///
/// - `email`: the user's email at issuance time
/// - `role`: `USER` or `ADMIN`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Email address (custom claim)
    pub email: String,

    /// Authorization role (custom claim)
    pub role: UserRole,
}

impl Claims {
    /// Creates claims with the default 24-hour expiration
    pub fn new(user_id: Uuid, email: String, role: UserRole) -> Self {
        Self::with_expiration(user_id, email, role, Duration::hours(24))
    }

    /// Creates claims with a custom expiration
    pub fn with_expiration(user_id: Uuid, email: String, role: UserRole, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
            email,
            role,
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a signed JWT from claims
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a JWT and extracts its claims
///
/// Verifies the signature, expiration, not-before, and issuer.
///
/// # Errors
///
/// Returns `JwtError::Expired` for expired tokens,
/// `JwtError::InvalidIssuer` for wrong issuers, and
/// `JwtError::ValidationError` for everything else.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
