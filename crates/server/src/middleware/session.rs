//! Session middleware configuration.
//!
//! Sets up `SQLite`-backed sessions using tower-sessions. The session cookie
//! only carries an opaque id; the identity lives server-side in the store and
//! is looked up on every request.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use sqlx::SqlitePool;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::ServerConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "tinycart_session";

/// The session layer type used by the app.
pub type SessionLayer = SessionManagerLayer<SqliteStore, SignedCookie>;

/// Create the session store and its table.
///
/// # Errors
///
/// Returns `sqlx::Error` if the session table cannot be created.
pub async fn create_session_store(pool: &SqlitePool) -> Result<SqliteStore, sqlx::Error> {
    let store = SqliteStore::new(pool.clone());
    store.migrate().await?;
    Ok(store)
}

/// Create the session layer.
///
/// Cookies live until the browser session ends, are signed with a key
/// derived from the configured session secret, and are marked `Secure`
/// when the API is served over HTTPS.
#[must_use]
pub fn create_session_layer(store: SqliteStore, config: &ServerConfig) -> SessionLayer {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(signing_key(&config.session_secret))
}

/// Derive the 64-byte cookie signing key from the session secret.
fn signing_key(secret: &SecretString) -> Key {
    let digest = Sha512::digest(secret.expose_secret().as_bytes());
    Key::from(digest.as_slice())
}
