//! Cart repository for database operations.
//!
//! Every mutation is a single statement, so each request commits atomically
//! without an explicit transaction.

use sqlx::SqlitePool;

use tinycart_core::{CartItemId, ProductId, UserId};

use super::RepositoryError;
use crate::models::{CartItem, CartLine};

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Add one unit of a product to a user's cart.
    ///
    /// The product lookup and the insert are one statement: returns `None`
    /// (and inserts nothing) when the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(
            r"
            INSERT INTO cart_item (user_id, product_id)
            SELECT ?1, id FROM product WHERE id = ?2
            RETURNING id, user_id, product_id
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }

    /// Remove one cart row of `product_id` from a user's cart.
    ///
    /// Rows are matched by product, not by cart row id; when the product was
    /// added several times the oldest row goes first. Returns the id of the
    /// removed row, or `None` if the user has no such product in the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove_one_by_product(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Option<CartItemId>, RepositoryError> {
        let removed = sqlx::query_scalar::<_, CartItemId>(
            r"
            DELETE FROM cart_item
            WHERE id = (
                SELECT id FROM cart_item
                WHERE user_id = ?1 AND product_id = ?2
                ORDER BY id
                LIMIT 1
            )
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(removed)
    }

    /// List a user's cart rows with product name and price.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, CartLine>(
            r"
            SELECT c.id, c.user_id, c.product_id,
                   p.name AS product_name,
                   p.price AS product_price
            FROM cart_item c
            JOIN product p ON p.id = c.product_id
            WHERE c.user_id = ?1
            ORDER BY c.id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    /// Delete every cart row of a user. Returns how many rows went.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn clear(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_item WHERE user_id = ?1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
