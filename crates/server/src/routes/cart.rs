//! Cart route handlers.
//!
//! Every cart route requires a logged-in user and acts on that user's rows only.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    response::IntoResponse,
};
use tracing::instrument;

use tinycart_core::ProductId;

use super::message;
use crate::db::CartRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireAuth;
use crate::models::CartLine;
use crate::state::AppState;

/// List the current user's cart rows with product name and price.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn show(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<CartLine>>> {
    let lines = CartRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(lines))
}

/// Add one unit of a product to the cart.
///
/// Adding the same product again adds another row.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn add(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    product_id: std::result::Result<Path<ProductId>, PathRejection>,
) -> Result<impl IntoResponse> {
    let Path(product_id) = product_id?;

    let Some(item) = CartRepository::new(state.pool())
        .add(user.id, product_id)
        .await?
    else {
        return Err(AppError::BadRequest(
            "Failed to add item to the cart".to_string(),
        ));
    };

    let product_ref = product_id.to_string();
    add_breadcrumb(
        "cart",
        "Added item",
        Some(&[("product_id", product_ref.as_str())][..]),
    );
    tracing::info!(cart_item_id = %item.id, %product_id, "Item added to cart");
    Ok(message("Item added to the cart successfully"))
}

/// Remove one unit of a product from the cart.
///
/// The `{item_id}` path segment is a **product id**, not a cart row id: the
/// oldest row of that product in the user's cart is removed. A specific
/// duplicate row cannot be targeted. Clients depend on this contract, so it
/// is kept as is.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn remove(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    item_id: std::result::Result<Path<ProductId>, PathRejection>,
) -> Result<impl IntoResponse> {
    let Path(product_id) = item_id?;

    let Some(removed) = CartRepository::new(state.pool())
        .remove_one_by_product(user.id, product_id)
        .await?
    else {
        return Err(AppError::BadRequest(
            "Failed to remove item from the cart".to_string(),
        ));
    };

    let product_ref = product_id.to_string();
    add_breadcrumb(
        "cart",
        "Removed item",
        Some(&[("product_id", product_ref.as_str())][..]),
    );
    tracing::info!(cart_item_id = %removed, %product_id, "Item removed from cart");
    Ok(message("Item removed from the cart successfully"))
}

/// Clear the cart. Succeeds even when the cart is already empty.
///
/// No order record is created.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn checkout(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let cleared = CartRepository::new(state.pool()).clear(user.id).await?;

    add_breadcrumb("cart", "Checked out", None);
    tracing::info!(items = cleared, "Cart checked out");
    Ok(message("Checkout successful. Cart has been cleared."))
}
