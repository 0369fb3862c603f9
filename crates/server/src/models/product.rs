//! Catalog types.

use serde::Serialize;
use sqlx::FromRow;

use tinycart_core::{Price, ProductId};

/// A catalog entry with its full detail.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub description: Option<String>,
}

/// The list-view projection of a product (no description).
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
}

/// Fields for a new catalog entry.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub description: Option<String>,
}

/// A partial update; `None` fields keep their stored value.
///
/// `description` is nullable, so `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Price>,
    #[allow(clippy::option_option)]
    pub description: Option<Option<String>>,
}

impl ProductUpdate {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.description.is_none()
    }
}
