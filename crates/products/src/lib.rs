//! Products domain module.
//!
//! This crate contains the product record as the backend serves it, the
//! payloads the client sends, and the pure rules applied to them locally
//! (status labels, shallow merge, form validation, list filtering). No IO.

pub mod filter;
pub mod product;
pub mod status;
pub mod unit;

pub use filter::{ProductFilter, categories};
pub use product::{NewProduct, Product, ProductPatch};
pub use status::StockStatus;
pub use unit::Unit;
