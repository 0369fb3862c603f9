//! Product catalog commands.

use sqlx::SqlitePool;

use tinycart_core::{Price, ProductId};
use tinycart_server::db::ProductRepository;
use tinycart_server::models::NewProduct;

use super::CommandError;

/// Create a new product.
pub async fn create(
    pool: &SqlitePool,
    name: String,
    price: f64,
    description: String,
) -> Result<ProductId, CommandError> {
    let product = NewProduct {
        name,
        price: Price::new(price)?,
        description: Some(description),
    };

    let created = ProductRepository::new(pool).create(&product).await?;

    tracing::info!(
        "Product created successfully! ID: {}, Name: {}, Price: {}",
        created.id,
        created.name,
        created.price
    );
    Ok(created.id)
}
