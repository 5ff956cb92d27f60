//! The remote API, one method per endpoint.
//!
//! Implementations are stateless request/response plumbing: no business
//! logic, no caching. [`crate::http::HttpGateway`] is the real one.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use stockroom_core::ProductId;
use stockroom_inventory::{HistoryEntry, ImportSummary};
use stockroom_products::{NewProduct, Product, ProductPatch};

use crate::error::GatewayResult;

/// Default page size of the global change log.
pub const DEFAULT_LOG_LIMIT: u32 = 50;

/// Query parameters of `GET /products`; only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl ProductQuery {
    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ProductQuery::default()
    }
}

#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// `GET /health`: liveness only; the body is not interpreted.
    async fn health(&self) -> GatewayResult<Value>;

    /// `GET /products`
    async fn list_products(&self, query: &ProductQuery) -> GatewayResult<Vec<Product>>;

    /// `GET /products/search?name=`
    async fn search_products(&self, name: &str) -> GatewayResult<Vec<Product>>;

    /// `GET /products/{id}`
    async fn get_product(&self, id: ProductId) -> GatewayResult<Product>;

    /// `POST /products`: returns the created record with its assigned id.
    async fn create_product(&self, data: &NewProduct) -> GatewayResult<Product>;

    /// `PUT /products/{id}`: the response may be partial.
    async fn update_product(&self, id: ProductId, data: &ProductPatch)
    -> GatewayResult<ProductPatch>;

    /// `DELETE /products/{id}`
    async fn delete_product(&self, id: ProductId) -> GatewayResult<()>;

    /// `POST /products/import`: multipart upload, file field `csvFile`.
    async fn import_products(&self, file_name: &str, csv: Vec<u8>)
    -> GatewayResult<ImportSummary>;

    /// `GET /products/export`: raw CSV bytes.
    async fn export_products(&self) -> GatewayResult<Vec<u8>>;

    /// `GET /inventory/{id}/history`
    async fn product_history(&self, id: ProductId) -> GatewayResult<Vec<HistoryEntry>>;

    /// `GET /inventory?limit=`
    async fn inventory_log(&self, limit: u32) -> GatewayResult<Vec<HistoryEntry>>;

    /// `GET /inventory/stats/summary`
    async fn inventory_stats(&self) -> GatewayResult<Value>;

    /// `GET /inventory/health/check`
    async fn inventory_health(&self) -> GatewayResult<Value>;
}
