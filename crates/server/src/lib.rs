//! tinycart server library.
//!
//! This crate provides the HTTP API as a library so the binary, the CLI, and
//! the integration tests all share one router and one set of repositories.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use sqlx::SqlitePool;

use config::ServerConfig;
use db::RepositoryError;
use state::AppState;

pub use routes::app;

/// Prepare the database and build the complete application router.
///
/// Applies schema migrations, creates the session table, and wires the
/// session layer into [`app`].
///
/// # Errors
///
/// Returns `RepositoryError` if migrations or session-store setup fail.
pub async fn build_app(config: ServerConfig, pool: SqlitePool) -> Result<Router, RepositoryError> {
    db::run_migrations(&pool).await?;
    let store = middleware::create_session_store(&pool).await?;
    let session_layer = middleware::create_session_layer(store, &config);

    Ok(app(AppState::new(config, pool), session_layer))
}
