//! Cart types.
//!
//! A cart is the set of `cart_item` rows owned by a user. Each row is one unit
//! of one product; adding the same product twice yields two rows.

use serde::Serialize;
use sqlx::FromRow;

use tinycart_core::{CartItemId, Price, ProductId, UserId};

/// A stored cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
}

/// A cart row joined with the product's name and price, as returned by `GET /api/cart`.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CartLine {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_price: Price,
}
