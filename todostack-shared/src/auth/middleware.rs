/// Authentication middleware for Axum
///
/// Validates `Authorization: Bearer <token>` headers and injects an
/// [`AuthUser`] into request extensions. A second middleware gates the
/// admin subtree on the `ADMIN` role.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use todostack_shared::auth::middleware::{create_jwt_middleware, AuthUser};
///
/// async fn whoami(Extension(auth): Extension<AuthUser>) -> String {
///     format!("{} ({})", auth.email, auth.role)
/// }
///
/// let app: Router = Router::new()
///     .route("/whoami", get(whoami))
///     .layer(middleware::from_fn(create_jwt_middleware("jwt-secret-at-least-32-bytes-long")));
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, Claims, JwtError};
use crate::models::user::UserRole;

/// The caller's identity, derived from a validated token
///
/// Ephemeral: lives only in request extensions for the duration of one
/// request, never persisted. Every mutating rule takes it as input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// User ID
    pub id: Uuid,

    /// Email address at token issuance time
    pub email: String,

    /// Authorization role
    pub role: UserRole,
}

impl AuthUser {
    /// Derives the caller identity from validated claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email.clone(),
            role: claims.role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Error type for authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Invalid authorization header format
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),

    /// Caller lacks the required role
    Forbidden(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            AuthError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg).into_response(),
        }
    }
}

/// JWT authentication middleware
///
/// Extracts the Bearer token, validates it, and inserts an [`AuthUser`]
/// extension for downstream handlers.
///
/// # Errors
///
/// - 401 if the Authorization header is missing or the token is invalid
///   or expired
/// - 400 if the header is not a Bearer token
pub async fn jwt_auth_middleware(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token, &secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken(format!("Invalid token: {}", e)),
    })?;

    req.extensions_mut().insert(AuthUser::from_claims(&claims));

    Ok(next.run(req).await)
}

/// Admin-role guard
///
/// Must be layered inside the JWT middleware: it reads the [`AuthUser`]
/// extension and rejects non-admin callers with 403.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AuthError> {
    let auth = req
        .extensions()
        .get::<AuthUser>()
        .ok_or(AuthError::MissingCredentials)?;

    if !auth.is_admin() {
        return Err(AuthError::Forbidden(
            "Admin role required".to_string(),
        ));
    }

    Ok(next.run(req).await)
}

/// Creates a JWT authentication middleware closure
///
/// Captures the secret so the middleware can be layered with
/// `axum::middleware::from_fn`.
pub fn create_jwt_middleware(
    secret: impl Into<String>,
) -> impl Fn(Request, Next) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>>
       + Clone {
    let secret = secret.into();
    move |req, next| {
        let secret = secret.clone();
        Box::pin(jwt_auth_middleware(secret, req, next))
    }
}
