//! CLI subcommands.

pub mod migrate;
pub mod product;
pub mod seed;
pub mod user;

use sqlx::SqlitePool;
use thiserror::Error;

use tinycart_core::PriceError;
use tinycart_server::config::database_url_from_env;
use tinycart_server::db::{self, RepositoryError};
use tinycart_server::services::auth::AuthError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Could not open the database.
    #[error("Database connection error: {0}")]
    Connect(#[from] sqlx::Error),

    /// A query or migration failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// User creation failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The price given on the command line is unusable.
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),
}

/// Open the configured database.
///
/// Every command needs the schema, so pending migrations are applied here too.
pub async fn connect() -> Result<SqlitePool, CommandError> {
    dotenvy::dotenv().ok();

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url_from_env()).await?;
    db::run_migrations(&pool).await?;
    Ok(pool)
}
