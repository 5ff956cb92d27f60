//! The in-memory product collection.
//!
//! Sole owner of the collection: every mutation goes through one of the four
//! operations below. All of them are synchronous and never fail; `patch` and
//! `remove` are no-ops for an absent id. Locks are never held across an
//! `.await`, so mutations from overlapping requests apply one at a time.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockroom_core::{Entity, ProductId};
use stockroom_products::{Product, ProductPatch};

#[derive(Debug, Default)]
pub struct ProductStore {
    items: RwLock<Vec<Product>>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Product>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Discard prior contents and keep `items` in the given order.
    pub fn replace_all(&self, items: Vec<Product>) {
        *self.write() = items;
    }

    /// Prepend a newly created record.
    ///
    /// An existing entry with the same id is dropped first so ids stay unique.
    pub fn insert(&self, item: Product) {
        let mut items = self.write();
        items.retain(|p| p.id() != item.id());
        items.insert(0, item);
    }

    /// Shallow-merge `fields` over the entry with `id`. Returns whether an
    /// entry was found.
    pub fn patch(&self, id: ProductId, fields: &ProductPatch) -> bool {
        let mut items = self.write();
        match items.iter_mut().find(|p| p.id() == id) {
            Some(product) => {
                product.merge(fields);
                true
            }
            None => false,
        }
    }

    /// Drop the entry with `id`. Returns whether one was present.
    pub fn remove(&self, id: ProductId) -> bool {
        let mut items = self.write();
        let before = items.len();
        items.retain(|p| p.id() != id);
        items.len() != before
    }

    pub fn snapshot(&self) -> Vec<Product> {
        self.read().clone()
    }

    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.read().iter().find(|p| p.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Run `f` against the current contents without cloning them.
    pub fn with_items<R>(&self, f: impl FnOnce(&[Product]) -> R) -> R {
        f(&self.read())
    }
}
