//! In-memory gateway for controller tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use stockroom_core::ProductId;
use stockroom_inventory::{HistoryEntry, ImportSummary};
use stockroom_products::{NewProduct, Product, ProductPatch, StockStatus};

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{ProductGateway, ProductQuery};

pub(crate) fn product(id: i64, name: &str, stock: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        unit: "Piece".to_string(),
        category: "Stationery".to_string(),
        brand: "Acme".to_string(),
        stock,
        image: None,
        status: StockStatus::from_stock(stock).to_string(),
    }
}

pub(crate) fn pen() -> NewProduct {
    NewProduct {
        name: "Pen".to_string(),
        category: "Stationery".to_string(),
        brand: "Acme".to_string(),
        stock: 10,
        ..NewProduct::default()
    }
}

#[derive(Default)]
struct Backend {
    products: Vec<Product>,
    next_id: i64,
    calls: Vec<&'static str>,
    failures: HashMap<&'static str, GatewayError>,
    delays: HashMap<&'static str, VecDeque<Duration>>,
    partial_updates: bool,
    last_query: Option<ProductQuery>,
    staged_import: Option<(Vec<Product>, u64)>,
}

/// Records every call, and can be told to fail or stall per endpoint.
#[derive(Default)]
pub(crate) struct FakeGateway {
    backend: Mutex<Backend>,
}

impl FakeGateway {
    pub(crate) fn with_products(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id.get()).max().unwrap_or(0) + 1;
        Self {
            backend: Mutex::new(Backend {
                products,
                next_id,
                ..Backend::default()
            }),
        }
    }

    fn backend(&self) -> std::sync::MutexGuard<'_, Backend> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.backend().calls.clone()
    }

    pub(crate) fn count(&self, endpoint: &str) -> usize {
        self.backend().calls.iter().filter(|c| **c == endpoint).count()
    }

    pub(crate) fn last_query(&self) -> Option<ProductQuery> {
        self.backend().last_query.clone()
    }

    /// Fail every later call to `endpoint` until [`recover`](Self::recover).
    pub(crate) fn fail(&self, endpoint: &'static str, err: GatewayError) {
        self.backend().failures.insert(endpoint, err);
    }

    pub(crate) fn recover(&self, endpoint: &'static str) {
        self.backend().failures.remove(endpoint);
    }

    /// Queue a delay for the next call to `endpoint`; calls take queued
    /// delays in the order they are issued.
    pub(crate) fn delay(&self, endpoint: &'static str, delay: Duration) {
        self.backend()
            .delays
            .entry(endpoint)
            .or_default()
            .push_back(delay);
    }

    pub(crate) fn set_next_id(&self, id: i64) {
        self.backend().next_id = id;
    }

    /// Answer updates with only the fields that were sent.
    pub(crate) fn partial_updates(&self, partial: bool) {
        self.backend().partial_updates = partial;
    }

    /// Rows the next import call "parses" out of the upload.
    pub(crate) fn stage_import(&self, rows: Vec<Product>, skipped: u64) {
        self.backend().staged_import = Some((rows, skipped));
    }

    async fn enter(&self, endpoint: &'static str) -> GatewayResult<()> {
        let (delay, failure) = {
            let mut backend = self.backend();
            backend.calls.push(endpoint);
            let delay = backend
                .delays
                .get_mut(endpoint)
                .and_then(VecDeque::pop_front);
            (delay, backend.failures.get(endpoint).cloned())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProductGateway for FakeGateway {
    async fn health(&self) -> GatewayResult<Value> {
        self.enter("health").await?;
        Ok(json!({ "status": "ok" }))
    }

    async fn list_products(&self, query: &ProductQuery) -> GatewayResult<Vec<Product>> {
        self.enter("list_products").await?;
        let mut backend = self.backend();
        backend.last_query = Some(query.clone());
        Ok(backend
            .products
            .iter()
            .filter(|p| query.category.as_ref().is_none_or(|c| &p.category == c))
            .cloned()
            .collect())
    }

    async fn search_products(&self, name: &str) -> GatewayResult<Vec<Product>> {
        self.enter("search_products").await?;
        let needle = name.to_lowercase();
        Ok(self
            .backend()
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: ProductId) -> GatewayResult<Product> {
        self.enter("get_product").await?;
        self.backend()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| GatewayError::remote(404, r#"{"error":"Product not found"}"#))
    }

    async fn create_product(&self, data: &NewProduct) -> GatewayResult<Product> {
        self.enter("create_product").await?;
        let mut backend = self.backend();
        let record = Product {
            id: ProductId::new(backend.next_id),
            name: data.name.clone(),
            unit: data.unit.clone(),
            category: data.category.clone(),
            brand: data.brand.clone(),
            stock: data.stock,
            image: data.image.clone(),
            status: StockStatus::from_stock(data.stock).to_string(),
        };
        backend.next_id += 1;
        backend.products.push(record.clone());
        Ok(record)
    }

    async fn update_product(
        &self,
        id: ProductId,
        data: &ProductPatch,
    ) -> GatewayResult<ProductPatch> {
        self.enter("update_product").await?;
        let mut backend = self.backend();
        let partial = backend.partial_updates;
        let Some(record) = backend.products.iter_mut().find(|p| p.id == id) else {
            return Err(GatewayError::remote(404, r#"{"error":"Product not found"}"#));
        };
        record.merge(data);
        if partial {
            Ok(data.clone())
        } else {
            Ok(ProductPatch::from(&*record))
        }
    }

    async fn delete_product(&self, id: ProductId) -> GatewayResult<()> {
        self.enter("delete_product").await?;
        self.backend().products.retain(|p| p.id != id);
        Ok(())
    }

    async fn import_products(&self, _file_name: &str, _csv: Vec<u8>) -> GatewayResult<ImportSummary> {
        self.enter("import_products").await?;
        let mut backend = self.backend();
        let (rows, skipped) = backend.staged_import.take().unwrap_or_default();
        let added = rows.len() as u64;
        backend.products.extend(rows);
        Ok(ImportSummary { added, skipped })
    }

    async fn export_products(&self) -> GatewayResult<Vec<u8>> {
        self.enter("export_products").await?;
        let mut csv = String::from("id,name,unit,category,brand,stock,status\n");
        for p in &self.backend().products {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                p.id, p.name, p.unit, p.category, p.brand, p.stock, p.status
            ));
        }
        Ok(csv.into_bytes())
    }

    async fn product_history(&self, _id: ProductId) -> GatewayResult<Vec<HistoryEntry>> {
        self.enter("product_history").await?;
        Ok(Vec::new())
    }

    async fn inventory_log(&self, _limit: u32) -> GatewayResult<Vec<HistoryEntry>> {
        self.enter("inventory_log").await?;
        Ok(Vec::new())
    }

    async fn inventory_stats(&self) -> GatewayResult<Value> {
        self.enter("inventory_stats").await?;
        let backend = self.backend();
        Ok(json!({
            "total": backend.products.len(),
            "outOfStock": backend.products.iter().filter(|p| p.stock <= 0).count(),
        }))
    }

    async fn inventory_health(&self) -> GatewayResult<Value> {
        self.enter("inventory_health").await?;
        Ok(json!({ "status": "ok" }))
    }
}
