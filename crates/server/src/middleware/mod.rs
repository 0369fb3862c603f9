//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, one transaction per request)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS (allow any origin)
//! 5. Session layer (tower-sessions with `SQLite` store)
//!
//! Authentication is not a layer: protected handlers take the
//! [`RequireAuth`] extractor.

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{AuthRejection, RequireAuth, clear_current_user, set_current_user};
pub use request_id::request_id_middleware;
pub use session::{SessionLayer, create_session_layer, create_session_store};
