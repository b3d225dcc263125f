/// Database layer for TodoStack
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with health checks
/// - `migrations`: embedded migration runner
///
/// Models live in the crate-root `models` module.

pub mod migrations;
pub mod pool;
