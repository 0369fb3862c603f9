//! User management commands.

use sqlx::SqlitePool;

use tinycart_core::UserId;
use tinycart_server::services::auth::AuthService;

use super::CommandError;

/// Create a new user.
///
/// Follows the same rules as the HTTP registration endpoint: any non-empty
/// strings are accepted and a taken username is an error.
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<UserId, CommandError> {
    tracing::info!("Creating user: {}", username);

    let user = AuthService::new(pool).register(username, password).await?;

    tracing::info!(
        "User created successfully! ID: {}, Username: {}",
        user.id,
        user.username
    );
    Ok(user.id)
}
