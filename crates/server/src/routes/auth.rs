//! Login and logout handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::Value;
use tower_sessions::Session;
use tracing::instrument;

use super::message;
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Login request body.
///
/// Fields are taken as raw JSON so a wrong-typed value is a failed login,
/// not a malformed request.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<Value>,
    pub password: Option<Value>,
}

impl LoginRequest {
    /// Both credentials, if both are strings.
    fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_ref()?.as_str()?;
        let password = self.password.as_ref()?.as_str()?;
        Some((username, password))
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Verify credentials and bind the session to the user.
///
/// A missing or non-string username or password counts as bad credentials
/// (401), not as a malformed request.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(request) = payload?;
    let Some((username, password)) = request.credentials() else {
        return Err(AppError::Auth(AuthError::InvalidCredentials));
    };

    let user = match AuthService::new(state.pool())
        .login(username, password)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(%username, "Login failed: {e}");
            return Err(e.into());
        }
    };

    set_current_user(&session, &CurrentUser::from(&user)).await?;
    set_sentry_user(&user.id, &user.username);
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(message("Logged in successfully"))
}

/// End the session.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn logout(RequireAuth(user): RequireAuth, session: Session) -> Result<impl IntoResponse> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    tracing::info!("User logged out");

    Ok(message("Logout successfully"))
}
