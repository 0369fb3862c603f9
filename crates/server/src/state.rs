//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// This is the explicit application context: built once at startup and
/// handed to every handler through axum's `State`. It is cheaply cloneable
/// via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: SqlitePool,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ServerConfig, pool: SqlitePool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, pool }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::config::SentryConfig;

    #[tokio::test]
    async fn test_clones_share_context() {
        let pool = crate::db::test_pool().await;
        let config = ServerConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: std::net::Ipv4Addr::LOCALHOST.into(),
            port: 5000,
            base_url: "http://127.0.0.1:5000".to_string(),
            session_secret: SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6d"),
            log_json: false,
            sentry: SentryConfig::default(),
        };

        let state = AppState::new(config, pool);
        let clone = state.clone();

        assert!(Arc::ptr_eq(&state.inner, &clone.inner));
        assert_eq!(clone.config().port, 5000);
        assert!(!clone.config().is_secure());
    }
}
