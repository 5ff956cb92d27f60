//! Synchronization controller: the component the UI talks to.
//!
//! Every mutation is write-then-commit: the request is issued, awaited, and
//! only a confirmed server response is applied to the [`ProductStore`]. A
//! failed write leaves the collection exactly as it was, so there is nothing
//! to roll back.
//!
//! Overlapping calls are allowed. Each commit is applied atomically when its
//! own request resolves; two updates racing on one id end with whichever
//! resolved last. Requests are never cancelled.

use std::future::Future;
use std::sync::{PoisonError, RwLock};

use serde_json::Value;
use tokio::sync::OnceCell;

use stockroom_core::ProductId;
use stockroom_inventory::{HistoryEntry, ImportSummary};
use stockroom_products::{NewProduct, Product, ProductFilter, ProductPatch, categories};

use crate::error::GatewayResult;
use crate::gateway::{ProductGateway, ProductQuery};
use crate::normalize::{Operation, normalize};
use crate::outcome::Outcome;
use crate::probe::ConnectionProbe;
use crate::session::{ConnectionState, Session};
use crate::store::ProductStore;

pub struct SyncController<G> {
    gateway: G,
    store: ProductStore,
    session: RwLock<Session>,
    verdict: OnceCell<ConnectionState>,
}

impl<G: ProductGateway> SyncController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            store: ProductStore::new(),
            session: RwLock::new(Session::default()),
            verdict: OnceCell::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    pub fn session(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .connection
    }

    fn update_session(&self, f: impl FnOnce(&mut Session)) {
        f(&mut self.session.write().unwrap_or_else(PoisonError::into_inner));
    }

    // --- startup ---------------------------------------------------------

    fn connection_probe(&self) -> ConnectionProbe<'_, G> {
        ConnectionProbe::new(&self.gateway, &self.session, &self.verdict)
    }

    /// Run the connectivity probe (once per session) and return its verdict.
    pub async fn probe(&self) -> ConnectionState {
        self.connection_probe().probe().await
    }

    /// Mount: probe, and on success load the full collection.
    ///
    /// The initial fetch is issued from the probe's success branch, after the
    /// state has already moved to `Connected`, so it is never skipped. Calls
    /// that did not perform the probe wait for its verdict and do no I/O.
    pub async fn start(&self) -> ConnectionState {
        match self.connection_probe().run().await {
            (ConnectionState::Connected, true) => {
                tracing::info!("backend connection successful, fetching products");
                self.fetch_all(&ProductQuery::default()).await;
                ConnectionState::Connected
            }
            (state, _) => state,
        }
    }

    // --- reads -----------------------------------------------------------

    /// Replace the collection with the backend's list.
    ///
    /// Does nothing (no request) unless the session is `Connected`. Failures
    /// become the session's fetch error; the collection is left untouched.
    pub async fn fetch_all(&self, query: &ProductQuery) {
        self.load(Operation::Fetch, self.gateway.list_products(query))
            .await
    }

    /// `fetch_all` with no filter.
    pub async fn refetch(&self) {
        self.fetch_all(&ProductQuery::default()).await
    }

    /// Replace the collection with the backend's name search. Gated and
    /// reported like [`fetch_all`](Self::fetch_all).
    pub async fn search(&self, name: &str) {
        self.load(Operation::Search, self.gateway.search_products(name))
            .await
    }

    async fn load(
        &self,
        operation: Operation,
        request: impl Future<Output = GatewayResult<Vec<Product>>>,
    ) {
        if self.connection_state() != ConnectionState::Connected {
            tracing::debug!("waiting for connection test; skipping product fetch");
            return;
        }

        self.update_session(Session::begin_fetch);
        tracing::debug!("fetching products");

        let error = match request.await {
            Ok(items) => {
                tracing::info!(count = items.len(), "fetched products");
                self.store.replace_all(items);
                None
            }
            Err(err) => {
                let message = normalize(&err, operation);
                tracing::error!(error = %message, "error fetching products");
                Some(message)
            }
        };

        self.update_session(|session| session.end_fetch(error));
    }

    /// Fetch one record. The collection is not touched.
    pub async fn product(&self, id: ProductId) -> Outcome<Product> {
        self.issue(Operation::FetchOne, self.gateway.get_product(id), |_, _| {})
            .await
    }

    pub async fn history(&self, id: ProductId) -> Outcome<Vec<HistoryEntry>> {
        self.issue(Operation::History, self.gateway.product_history(id), |_, _| {})
            .await
    }

    pub async fn inventory_log(&self, limit: u32) -> Outcome<Vec<HistoryEntry>> {
        self.issue(Operation::Log, self.gateway.inventory_log(limit), |_, _| {})
            .await
    }

    pub async fn stats(&self) -> Outcome<Value> {
        self.issue(Operation::Stats, self.gateway.inventory_stats(), |_, _| {})
            .await
    }

    pub async fn inventory_health(&self) -> Outcome<Value> {
        self.issue(Operation::Health, self.gateway.inventory_health(), |_, _| {})
            .await
    }

    // --- writes ----------------------------------------------------------

    /// Issue a request, await it, and commit the confirmed result.
    ///
    /// `commit` runs only on success. Failures are normalized into the
    /// outcome; nothing is raised.
    async fn issue<T>(
        &self,
        operation: Operation,
        request: impl Future<Output = GatewayResult<T>>,
        commit: impl FnOnce(&ProductStore, &T),
    ) -> Outcome<T> {
        match request.await {
            Ok(value) => {
                commit(&self.store, &value);
                Outcome::Success(value)
            }
            Err(err) => {
                let message = normalize(&err, operation);
                tracing::warn!(?operation, error = %message, "operation failed");
                Outcome::Failure(message)
            }
        }
    }

    /// Create a product; the server's canonical record goes to the front of
    /// the collection. Input is not validated here (the form does that).
    pub async fn create(&self, data: &NewProduct) -> Outcome<Product> {
        tracing::info!(name = %data.name, "creating product");
        let outcome = self
            .issue(
                Operation::Create,
                self.gateway.create_product(data),
                |store, record| store.insert(record.clone()),
            )
            .await;
        if let Outcome::Success(record) = &outcome {
            tracing::info!(id = %record.id, "product created");
        }
        outcome
    }

    /// Update a product; the (normalized) response is shallow-merged into
    /// the stored record.
    pub async fn update(&self, id: ProductId, data: &ProductPatch) -> Outcome<ProductPatch> {
        tracing::info!(%id, "updating product");
        let request = async {
            self.gateway
                .update_product(id, data)
                .await
                .map(ProductPatch::normalized)
        };
        self.issue(Operation::Update, request, |store, response| {
            if !store.patch(id, response) {
                tracing::debug!(%id, "updated product is not in the local collection");
            }
        })
        .await
    }

    /// Delete a product. Succeeds (and changes nothing locally) when the id
    /// is not in the collection but the backend accepted the delete.
    pub async fn delete(&self, id: ProductId) -> Outcome<()> {
        tracing::info!(%id, "deleting product");
        self.issue(Operation::Delete, self.gateway.delete_product(id), |store, _| {
            store.remove(id);
        })
        .await
    }

    /// Upload a CSV file; on success the collection is reloaded.
    pub async fn import_csv(&self, file_name: &str, csv: Vec<u8>) -> Outcome<ImportSummary> {
        tracing::info!(file_name, bytes = csv.len(), "importing products");
        let outcome = self
            .issue(
                Operation::Import,
                self.gateway.import_products(file_name, csv),
                |_, _| {},
            )
            .await;
        if let Outcome::Success(summary) = &outcome {
            tracing::info!(added = summary.added, skipped = summary.skipped, "import completed");
            self.refetch().await;
        }
        outcome
    }

    /// Download the CSV export. Saving it is up to the caller.
    pub async fn export_csv(&self) -> Outcome<Vec<u8>> {
        self.issue(Operation::Export, self.gateway.export_products(), |_, _| {})
            .await
    }

    // --- views -----------------------------------------------------------

    pub fn products(&self) -> Vec<Product> {
        self.store.snapshot()
    }

    /// The filtered view the table renders.
    pub fn view(&self, filter: &ProductFilter) -> Vec<Product> {
        self.store.with_items(|items| filter.apply(items))
    }

    /// Category dropdown options.
    pub fn categories(&self) -> Vec<String> {
        self.store.with_items(categories)
    }
}
