//! Product repository for database operations.

use sqlx::SqlitePool;

use tinycart_core::ProductId;

use super::RepositoryError;
use crate::models::{NewProduct, Product, ProductSummary, ProductUpdate};

/// Repository for catalog database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every product (id, name, price) in id order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<ProductSummary>, RepositoryError> {
        let products = sqlx::query_as::<_, ProductSummary>(
            "SELECT id, name, price FROM product ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a product with its description.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, description FROM product WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let created = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO product (name, price, description)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, price, description
            ",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Apply the present fields of `update` to a product.
    ///
    /// Returns `None` if no product has this id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, RepositoryError> {
        let updated = sqlx::query_as::<_, Product>(
            r"
            UPDATE product
            SET name = COALESCE(?2, name),
                price = COALESCE(?3, price),
                description = CASE WHEN ?5 THEN ?4 ELSE description END
            WHERE id = ?1
            RETURNING id, name, price, description
            ",
        )
        .bind(id)
        .bind(update.name.as_deref())
        .bind(update.price)
        .bind(update.description.as_ref().and_then(Option::as_deref))
        .bind(update.description.is_some())
        .fetch_optional(self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a product. Its cart rows go with it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Count catalog entries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use tinycart_core::Price;

    use super::*;
    use crate::db::test_pool;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            price: Price::new(9.99).unwrap(),
            description: Some("A small widget".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_get_and_list() {
        let pool = test_pool().await;
        let repo = ProductRepository::new(&pool);

        let created = repo.create(&widget()).await.unwrap();
        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.description.as_deref(), Some("A small widget"));

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Widget");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let pool = test_pool().await;
        let repo = ProductRepository::new(&pool);
        let created = repo.create(&widget()).await.unwrap();

        let update = ProductUpdate {
            price: Some(Price::new(4.5).unwrap()),
            ..ProductUpdate::default()
        };
        let updated = repo.update(created.id, &update).await.unwrap().unwrap();

        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.price, Price::new(4.5).unwrap());
        assert_eq!(updated.description.as_deref(), Some("A small widget"));
        assert_eq!(repo.get(created.id).await.unwrap().unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_can_clear_description() {
        let pool = test_pool().await;
        let repo = ProductRepository::new(&pool);
        let created = repo.create(&widget()).await.unwrap();

        let update = ProductUpdate {
            description: Some(None),
            ..ProductUpdate::default()
        };
        let updated = repo.update(created.id, &update).await.unwrap().unwrap();
        assert_eq!(updated.description, None);

        let update = ProductUpdate {
            description: Some(Some("Back again".to_string())),
            ..ProductUpdate::default()
        };
        let updated = repo.update(created.id, &update).await.unwrap().unwrap();
        assert_eq!(updated.description.as_deref(), Some("Back again"));
        assert_eq!(updated.name, "Widget");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_product() {
        let pool = test_pool().await;
        let repo = ProductRepository::new(&pool);

        let update = ProductUpdate {
            name: Some("Ghost".to_string()),
            ..ProductUpdate::default()
        };
        assert!(repo.update(ProductId::new(999), &update).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(ProductId::new(999)).await,
            Err(RepositoryError::NotFound)
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
