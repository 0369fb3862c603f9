//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                      - Liveness check
//! GET    /health/ready                - Readiness check (database)
//!
//! # Accounts
//! POST   /api/users/add               - Register a user
//! POST   /login                       - Start a session
//! POST   /logout                      - End the session (requires auth)
//!
//! # Catalog
//! GET    /api/products                - List products (id, name, price)
//! GET    /api/products/{id}           - Product detail
//! POST   /api/products/add            - Create a product (requires auth)
//! PUT    /api/products/update/{id}    - Update a product (requires auth)
//! DELETE /api/products/delete/{id}    - Delete a product (requires auth)
//!
//! # Cart (all require auth)
//! GET    /api/cart                    - List the cart
//! POST   /api/cart/add/{product_id}   - Add one unit of a product
//! DELETE /api/cart/remove/{item_id}   - Remove one unit (matched by product id)
//! POST   /api/cart/checkout           - Clear the cart
//! ```

pub mod auth;
pub mod cart;
pub mod health;
pub mod products;
pub mod users;

use axum::{
    Json, Router,
    body::Body,
    http::Request,
    middleware,
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{SessionLayer, request_id_middleware};
use crate::state::AppState;

/// A `{"message": ...}` response body.
pub(crate) fn message(text: &str) -> Json<Value> {
    Json(json!({ "message": text }))
}

/// Create the account routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/add", post(users::add))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(products::index))
        .route("/api/products/{id}", get(products::show))
        .route("/api/products/add", post(products::create))
        .route("/api/products/update/{id}", put(products::update))
        .route("/api/products/delete/{id}", delete(products::destroy))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/api/cart", get(cart::show))
        .route("/api/cart/add/{product_id}", post(cart::add))
        .route("/api/cart/remove/{item_id}", delete(cart::remove))
        .route("/api/cart/checkout", post(cart::checkout))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(auth_routes())
        .merge(product_routes())
        .merge(cart_routes())
}

/// Build the complete application: routes, sessions, CORS, request ids, and tracing.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState, session_layer: SessionLayer) -> Router {
    routes()
        .layer(session_layer)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
                user_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}
