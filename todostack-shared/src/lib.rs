//! # TodoStack Shared Library
//!
//! Shared types and business rules used by the TodoStack API server.
//!
//! ## Module Organization
//!
//! - `models`: database models, CRUD operations, and the manager
//!   assignment/removal rules
//! - `auth`: password hashing, JWT issuance/validation, axum auth
//!   middleware
//! - `db`: connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the TodoStack shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
