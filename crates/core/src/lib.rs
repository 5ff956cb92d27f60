//! `stockroom-core`: shared building blocks.
//!
//! This crate contains **pure** primitives (no network, no storage) used by the
//! product, inventory and client crates.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{HistoryEntryId, ProductId};
