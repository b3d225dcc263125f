/// HTTP middleware for the API server
///
/// # Modules
///
/// - `admin_log`: audit logging for the admin subtree
///
/// Authentication middleware lives in the shared crate so tests can
/// exercise it without a server.

pub mod admin_log;
