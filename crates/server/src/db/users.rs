//! User repository for database operations.

use sqlx::SqlitePool;

use tinycart_core::UserId;

use super::{RepositoryError, map_unique_violation};
use crate::models::User;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(r#"SELECT id, username FROM "user" WHERE id = ?1"#)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Get a user together with their stored password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row: Option<(UserId, String, String)> = sqlx::query_as(
            r#"SELECT id, username, password FROM "user" WHERE username = ?1"#,
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(id, username, password_hash)| (User { id, username }, password_hash)))
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO "user" (username, password)
            VALUES (?1, ?2)
            RETURNING id, username
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "username"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        let user = repo.create("alice", "hash-1").await.unwrap();
        assert_eq!(user.username, "alice");

        let by_id = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id, user);

        let (found, hash) = repo.get_with_password_hash("alice").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(hash, "hash-1");

        assert!(repo.get_with_password_hash("bob").await.unwrap().is_none());
        assert!(repo.get_by_id(UserId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_conflict() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        repo.create("alice", "hash-1").await.unwrap();
        let err = repo.create("alice", "hash-2").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "user" WHERE username = 'alice'"#)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
