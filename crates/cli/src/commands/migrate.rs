//! Database migration command.
//!
//! Migrations live in `crates/server/migrations/` and are embedded into the
//! server library at compile time.

use sqlx::SqlitePool;

use tinycart_server::db;

use super::CommandError;

/// Apply pending migrations.
///
/// [`super::connect`] has already run them by the time this is called; running
/// again is a no-op that confirms the schema is current.
pub async fn run(pool: &SqlitePool) -> Result<(), CommandError> {
    tracing::info!("Running migrations...");
    db::run_migrations(pool).await?;
    tracing::info!("Migrations complete!");
    Ok(())
}
