//! Authentication extractor and session helpers.
//!
//! The session holds a [`CurrentUser`]; [`RequireAuth`] turns it back into a
//! live [`User`] by looking the id up in the database on every request.

use axum::{
    Json,
    extract::{FromRequestParts, OriginalUri},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::db::UserRepository;
use crate::models::{CurrentUser, User, session_keys};
use crate::state::AppState;

/// Path anonymous browser requests are redirected to.
pub const LOGIN_PATH: &str = "/login";

/// Extractor that requires an authenticated session.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub User);

/// Error returned when authentication is required but the user is not logged in.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to login page (for non-API requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
    /// The session or user lookup itself failed.
    Internal,
}

impl AuthRejection {
    /// Pick the rejection for an anonymous request to `path`.
    fn for_path(path: &str) -> Self {
        if path.starts_with("/api/") {
            Self::Unauthorized
        } else {
            Self::RedirectToLogin
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Unauthorized" })),
            )
                .into_response(),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Internal server error" })),
            )
                .into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map_or_else(|| parts.uri.path().to_owned(), |uri| uri.path().to_owned());

        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AuthRejection::Internal)?;

        let current: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to read session");
                AuthRejection::Internal
            })?
            .ok_or_else(|| AuthRejection::for_path(&path))?;

        let user = UserRepository::new(state.pool())
            .get_by_id(current.id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %current.id, "Failed to load session user");
                AuthRejection::Internal
            })?;

        match user {
            Some(user) => {
                tracing::Span::current().record("user_id", user.id.as_i64());
                Ok(Self(user))
            }
            None => {
                // The account behind this session is gone.
                tracing::warn!(user_id = %current.id, "Session refers to a missing user");
                if let Err(e) = session.flush().await {
                    tracing::error!(error = %e, "Failed to flush stale session");
                }
                Err(AuthRejection::for_path(&path))
            }
        }
    }
}

/// Bind the session to a user (login).
///
/// The session id is rotated first so an id issued before login cannot be reused after it.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Destroy the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be deleted from the store.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_depends_on_path() {
        assert!(matches!(
            AuthRejection::for_path("/api/cart"),
            AuthRejection::Unauthorized
        ));
        assert!(matches!(
            AuthRejection::for_path("/logout"),
            AuthRejection::RedirectToLogin
        ));
    }

    #[test]
    fn test_rejection_responses() {
        assert_eq!(
            AuthRejection::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthRejection::RedirectToLogin.into_response().status(),
            StatusCode::SEE_OTHER
        );
        assert_eq!(
            AuthRejection::Internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
