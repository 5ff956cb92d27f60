//! `stockroom-client`
//!
//! **Responsibility:** keep a local product collection in step with the
//! inventory backend.
//!
//! This crate provides:
//! - A one-shot connectivity probe that gates list fetches
//! - Write-then-commit create / update / delete
//! - Uniform error messages for every backend failure
//! - The HTTP gateway to the REST API
//!
//! The backend stays the authority: the local collection only ever holds
//! records the server has confirmed.

pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod http;
pub mod normalize;
pub mod outcome;
pub mod probe;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ClientConfig;
pub use controller::SyncController;
pub use error::{ConfigError, GatewayError, GatewayResult};
pub use gateway::{ProductGateway, ProductQuery};
pub use http::HttpGateway;
pub use outcome::Outcome;
pub use session::{ConnectionState, Session};
pub use store::ProductStore;
