/// Database migration runner
///
/// Runs the SQL migrations embedded from `todostack-shared/migrations/`
/// using sqlx's migration system. Each migration is applied once and
/// recorded in the `_sqlx_migrations` table.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration file is malformed or a migration
/// fails to execute; failed migrations are rolled back where the
/// statements allow it.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
