//! `reqwest`-backed gateway.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use stockroom_core::ProductId;
use stockroom_inventory::{HistoryEntry, HistoryResponse, ImportSummary};
use stockroom_products::{NewProduct, Product, ProductPatch};

use crate::config::ClientConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{ProductGateway, ProductQuery};

/// Multipart field the import endpoint reads.
const IMPORT_FIELD: &str = "csvFile";

/// HTTP client bound to one API base URL.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::Build(e.to_string()))?;

        tracing::info!(base_url = config.base_url(), "API gateway configured");

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request, logging both sides of the exchange, and turn
    /// non-2xx statuses into [`GatewayError::Remote`].
    async fn send(&self, builder: RequestBuilder) -> GatewayResult<Response> {
        let request = builder.build().map_err(|e| {
            tracing::error!(error = %e, "request error");
            GatewayError::Build(e.to_string())
        })?;
        let method = request.method().clone();
        let url = request.url().clone();

        tracing::debug!(%method, %url, "making request");

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                let err = GatewayError::from(e);
                tracing::warn!(%method, %url, error = %err, "response error");
                if err.is_connection_refused() {
                    tracing::error!("backend server is not running or inaccessible");
                }
                return Err(err);
            }
        };

        let status = response.status();
        tracing::debug!(%method, %url, status = status.as_u16(), "response received");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_else(|e| {
            tracing::debug!(%method, %url, error = %e, "could not read error body");
            String::new()
        });
        let err = GatewayError::remote(status.as_u16(), body);
        tracing::warn!(%method, %url, status = status.as_u16(), error = %err, "response error");
        Err(err)
    }

    async fn json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> GatewayResult<T> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await.map_err(GatewayError::from)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ProductGateway for HttpGateway {
    async fn health(&self) -> GatewayResult<Value> {
        let response = self.send(self.client.get(self.url("/health"))).await?;
        // Any 2xx body counts as alive, including empty or non-JSON ones.
        let text = response.text().await.unwrap_or_else(|e| {
            tracing::debug!(error = %e, "could not read health body");
            String::new()
        });
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    async fn list_products(&self, query: &ProductQuery) -> GatewayResult<Vec<Product>> {
        self.json(self.client.get(self.url("/products")).query(query))
            .await
    }

    async fn search_products(&self, name: &str) -> GatewayResult<Vec<Product>> {
        self.json(
            self.client
                .get(self.url("/products/search"))
                .query(&[("name", name)]),
        )
        .await
    }

    async fn get_product(&self, id: ProductId) -> GatewayResult<Product> {
        self.json(self.client.get(self.url(&format!("/products/{id}"))))
            .await
    }

    async fn create_product(&self, data: &NewProduct) -> GatewayResult<Product> {
        self.json(self.client.post(self.url("/products")).json(data))
            .await
    }

    async fn update_product(
        &self,
        id: ProductId,
        data: &ProductPatch,
    ) -> GatewayResult<ProductPatch> {
        let response = self
            .send(self.client.put(self.url(&format!("/products/{id}"))).json(data))
            .await?;
        let bytes = response.bytes().await.map_err(GatewayError::from)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ProductPatch::default());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn delete_product(&self, id: ProductId) -> GatewayResult<()> {
        self.send(self.client.delete(self.url(&format!("/products/{id}"))))
            .await?;
        Ok(())
    }

    async fn import_products(
        &self,
        file_name: &str,
        csv: Vec<u8>,
    ) -> GatewayResult<ImportSummary> {
        let part = Part::bytes(csv)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(|e| GatewayError::Build(e.to_string()))?;
        let form = Form::new().part(IMPORT_FIELD, part);

        self.json(self.client.post(self.url("/products/import")).multipart(form))
            .await
    }

    async fn export_products(&self) -> GatewayResult<Vec<u8>> {
        let response = self
            .send(self.client.get(self.url("/products/export")))
            .await?;
        let bytes = response.bytes().await.map_err(GatewayError::from)?;
        Ok(bytes.to_vec())
    }

    async fn product_history(&self, id: ProductId) -> GatewayResult<Vec<HistoryEntry>> {
        let body: HistoryResponse = self
            .json(self.client.get(self.url(&format!("/inventory/{id}/history"))))
            .await?;
        Ok(body.history)
    }

    async fn inventory_log(&self, limit: u32) -> GatewayResult<Vec<HistoryEntry>> {
        self.json(
            self.client
                .get(self.url("/inventory"))
                .query(&[("limit", limit)]),
        )
        .await
    }

    async fn inventory_stats(&self) -> GatewayResult<Value> {
        self.json(self.client.get(self.url("/inventory/stats/summary")))
            .await
    }

    async fn inventory_health(&self) -> GatewayResult<Value> {
        self.json(self.client.get(self.url("/inventory/health/check")))
            .await
    }
}
