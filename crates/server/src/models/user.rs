//! User domain types.

use sqlx::FromRow;

use tinycart_core::UserId;

use super::CurrentUser;

/// A registered account.
///
/// The password hash never leaves the repository layer except through
/// `UserRepository::get_with_password_hash`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}
