//! Domain models for tinycart.
//!
//! These are the shapes that cross the repository boundary and, for the
//! serializable ones, the JSON bodies returned by the API.

pub mod cart;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{CartItem, CartLine};
pub use product::{NewProduct, Product, ProductSummary, ProductUpdate};
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
