//! Seed the catalog with demo products.

use sqlx::SqlitePool;

use tinycart_core::Price;
use tinycart_server::db::ProductRepository;
use tinycart_server::models::NewProduct;

use super::CommandError;

/// Demo catalog: name, price, description.
const DEMO_PRODUCTS: &[(&str, f64, &str)] = &[
    ("Widget", 9.99, "A small widget"),
    ("Gadget", 24.50, "A handy gadget"),
    ("Gizmo", 4.25, "A mysterious gizmo"),
    ("Doohickey", 12.00, "Useful for most things"),
];

/// Insert the demo catalog unless the product table already has rows.
pub async fn run(pool: &SqlitePool) -> Result<(), CommandError> {
    let products = ProductRepository::new(pool);

    let existing = products.count().await?;
    if existing > 0 {
        tracing::info!(existing, "Catalog already has products, skipping seed");
        return Ok(());
    }

    for &(name, price, description) in DEMO_PRODUCTS {
        let product = products
            .create(&NewProduct {
                name: name.to_owned(),
                price: Price::new(price)?,
                description: Some(description.to_owned()),
            })
            .await?;
        tracing::info!(product_id = %product.id, name, "Seeded product");
    }

    tracing::info!(count = DEMO_PRODUCTS.len(), "Seed complete");
    Ok(())
}
