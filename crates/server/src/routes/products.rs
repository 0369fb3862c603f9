//! Catalog route handlers.
//!
//! Reads are public; writes require a logged-in user.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Deserializer};
use serde_json::json;
use tracing::instrument;

use tinycart_core::{Price, ProductId};

use super::message;
use crate::db::{ProductRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{NewProduct, Product, ProductSummary, ProductUpdate};
use crate::state::AppState;

const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Create product request body. `name` and `price` are required.
///
/// `description` distinguishes an absent key (`None`) from an explicit
/// `null` (`Some(None)`).
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<Price>,
    #[serde(default, deserialize_with = "present")]
    #[allow(clippy::option_option)]
    pub description: Option<Option<String>>,
}

/// Update product request body. Any subset of keys may be present.
///
/// A `"description": null` key clears the stored description.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<Price>,
    #[serde(default, deserialize_with = "present")]
    #[allow(clippy::option_option)]
    pub description: Option<Option<String>>,
}

/// Mark a key as present, keeping `null` as `Some(None)`.
///
/// Only runs when the key exists; `#[serde(default)]` covers the absent case.
#[allow(clippy::option_option)]
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        Self {
            name: request.name,
            price: request.price,
            description: request.description,
        }
    }
}

/// List all products without descriptions.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<ProductSummary>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Show one product including its description.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    id: std::result::Result<Path<ProductId>, PathRejection>,
) -> Result<Json<Product>> {
    let Path(id) = id?;

    ProductRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.to_string()))
}

/// Create a product.
///
/// A missing `description` key stores an empty string; an explicit `null`
/// stores no description.
///
/// Responds 201 with `{"message": "Product added successfully", "id": <id>}`.
/// This is the only success body that carries more than a message: clients
/// need the new id to fetch, update, or add the product to a cart.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(request) = payload?;
    let (Some(name), Some(price)) = (request.name, request.price) else {
        return Err(AppError::Validation("Invalid product data".to_string()));
    };

    let product = ProductRepository::new(state.pool())
        .create(&NewProduct {
            name,
            price,
            description: request.description.unwrap_or_else(|| Some(String::new())),
        })
        .await?;

    tracing::info!(product_id = %product.id, "Product created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Product added successfully", "id": product.id })),
    ))
}

/// Apply the fields present in the body to an existing product.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn update(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    id: std::result::Result<Path<ProductId>, PathRejection>,
    payload: std::result::Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let Json(request) = payload?;

    let update = ProductUpdate::from(request);
    let repo = ProductRepository::new(state.pool());
    let updated = if update.is_empty() {
        repo.get(id).await?
    } else {
        repo.update(id, &update).await?
    };

    if updated.is_none() {
        return Err(AppError::NotFound(PRODUCT_NOT_FOUND.to_string()));
    }

    tracing::info!(product_id = %id, "Product updated");
    Ok(message("Product updated successfully"))
}

/// Delete a product. Responds 204 with no body.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn destroy(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    id: std::result::Result<Path<ProductId>, PathRejection>,
) -> Result<StatusCode> {
    let Path(id) = id?;

    match ProductRepository::new(state.pool()).delete(id).await {
        Ok(()) => {
            tracing::info!(product_id = %id, "Product deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(PRODUCT_NOT_FOUND.to_string())),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_key_presence() {
        let request: UpdateProductRequest = serde_json::from_str(r#"{"price": 3}"#).unwrap();
        let update = ProductUpdate::from(request);
        assert!(update.name.is_none());
        assert_eq!(update.price, Some(Price::new(3.0).unwrap()));
        assert!(!update.is_empty());

        let empty: UpdateProductRequest = serde_json::from_str("{}").unwrap();
        assert!(ProductUpdate::from(empty).is_empty());
    }

    #[test]
    fn test_description_null_differs_from_absent() {
        let absent: UpdateProductRequest = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        assert_eq!(absent.description, None);

        let null: UpdateProductRequest =
            serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(null.description, Some(None));
        assert!(!ProductUpdate::from(null).is_empty());

        let set: CreateProductRequest =
            serde_json::from_str(r#"{"name": "x", "price": 1, "description": "d"}"#).unwrap();
        assert_eq!(set.description, Some(Some("d".to_string())));
    }

    #[test]
    fn test_create_request_rejects_non_numeric_price() {
        let parsed = serde_json::from_str::<CreateProductRequest>(r#"{"name": "x", "price": "cheap"}"#);
        assert!(parsed.is_err());
    }
}
