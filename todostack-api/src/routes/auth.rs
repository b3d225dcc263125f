/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /v1/auth/signup` - Register a new account, returns a token
/// - `POST /v1/auth/signin` - Exchange credentials for a token
///
/// Both endpoints return the same response shape: a bearer token the
/// client sends in the `Authorization` header on subsequent requests.

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use todostack_shared::auth::jwt::{create_token, Claims};
use todostack_shared::auth::password::{hash_password, validate_password_rules, verify_password};
use todostack_shared::models::user::{CreateUser, User, UserRole};

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address (must be valid format)
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (content rules checked separately)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Requested role; defaults to `USER`
    #[serde(default = "default_role")]
    pub role: UserRole,
}

fn default_role() -> UserRole {
    UserRole::User
}

/// Signin request
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Authentication response carrying the bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Signed bearer token (HS256, 24h expiry)
    pub token: String,
}

/// Signup handler
///
/// Rejects duplicate emails with 409 before hashing. The unique
/// constraint on `users.email` catches the remaining race, surfacing as
/// the same conflict message.
///
/// # Errors
///
/// - 422 on invalid email format
/// - 400 when the password violates the content rules
/// - 409 `"이미 존재하는 이메일입니다."` when the email is taken
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate().map_err(validation_error)?;
    validate_password_rules(&req.password).map_err(ApiError::BadRequest)?;

    if User::email_exists(&state.db, &req.email).await? {
        return Err(ApiError::Conflict("이미 존재하는 이메일입니다.".to_string()));
    }

    let password_hash = hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
            role: req.role,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    let claims = Claims::new(user.id, user.email, user.role);
    let token = create_token(&claims, state.jwt_secret())?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

/// Signin handler
///
/// # Errors
///
/// - 404 `"가입되지 않은 유저입니다."` when the email is unknown
/// - 401 `"잘못된 비밀번호입니다."` on password mismatch
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate().map_err(validation_error)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("가입되지 않은 유저입니다.".to_string()))?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(ApiError::Unauthorized("잘못된 비밀번호입니다.".to_string()));
    }

    tracing::info!(user_id = %user.id, "User signed in");

    let claims = Claims::new(user.id, user.email, user.role);
    let token = create_token(&claims, state.jwt_secret())?;

    Ok(Json(AuthResponse { token }))
}
