/// Password hashing and password-change rules
///
/// Hashing uses Argon2id (winner of the Password Hashing Competition)
/// with 64 MB memory, 3 iterations, 4 lanes. The password-change
/// invariant (new must differ from stored, old must match stored) lives
/// here too so it can be tested without a database.
///
/// # Example
///
/// ```
/// use todostack_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("Secret1234")?;
/// assert!(verify_password("Secret1234", &hash)?);
/// assert!(!verify_password("wrong", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Why a password change was refused
///
/// The display strings are the exact messages surfaced to API clients.
#[derive(Debug, thiserror::Error)]
pub enum PasswordChangeError {
    /// The new password verifies against the stored hash
    #[error("새 비밀번호는 기존 비밀번호와 같을 수 없습니다.")]
    SameAsOld,

    /// The old password does not verify against the stored hash
    #[error("잘못된 비밀번호입니다.")]
    WrongOldPassword,

    /// Hash parsing/verification failed
    #[error(transparent)]
    Hash(#[from] PasswordError),
}

/// Hashes a password using Argon2id
///
/// Parameters: m=65536 (64 MB), t=3, p=4, 32-byte output, random
/// 16-byte salt from the OS RNG. Returns a PHC string which embeds the
/// algorithm, parameters, and salt.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(65536)
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash
///
/// Constant-time comparison; parameters come from the PHC string.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` when the stored hash cannot be
/// parsed, `PasswordError::VerifyError` for other failures. A wrong
/// password is `Ok(false)`, not an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!(
            "Verification failed: {}",
            e
        ))),
    }
}

/// Checks the password-change invariant against a stored hash
///
/// The new password is checked first: changing to the password already
/// stored is a validation error regardless of what was supplied as the
/// old password. Then the old password must verify.
pub fn check_password_change(
    old_password: &str,
    new_password: &str,
    stored_hash: &str,
) -> Result<(), PasswordChangeError> {
    if verify_password(new_password, stored_hash)? {
        return Err(PasswordChangeError::SameAsOld);
    }

    if !verify_password(old_password, stored_hash)? {
        return Err(PasswordChangeError::WrongOldPassword);
    }

    Ok(())
}

/// Validates password content rules
///
/// A password must be at least 8 characters long and contain at least
/// one uppercase letter and one digit.
///
/// # Example
///
/// ```
/// use todostack_shared::auth::password::validate_password_rules;
///
/// assert!(validate_password_rules("Secret1234").is_ok());
/// assert!(validate_password_rules("short1A").is_err());
/// assert!(validate_password_rules("nouppercase1").is_err());
/// ```
pub fn validate_password_rules(password: &str) -> Result<(), String> {
    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_numeric()) {
        return Err("Password must contain at least one digit".to_string());
    }

    Ok(())
}
