//! Account registration handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use super::message;
use crate::error::{AppError, Result};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body. Both keys are required.
#[derive(Deserialize)]
pub struct AddUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for AddUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddUserRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Register a new user.
///
/// Returns 201 on success, 400 when a key is missing, 409 when the username is taken.
#[instrument(skip_all)]
pub async fn add(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AddUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(request) = payload?;
    let (Some(username), Some(password)) = (request.username, request.password) else {
        return Err(AppError::Validation("Invalid user data".to_string()));
    };

    AuthService::new(state.pool())
        .register(&username, &password)
        .await?;

    Ok((StatusCode::CREATED, message("User added successfully")))
}
