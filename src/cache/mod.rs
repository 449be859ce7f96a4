//! Process-wide product cache.
//!
//! Source of truth for reads between write confirmations. Entries always
//! hold the raw ledger tuple; decoding to the client-facing form is
//! deferred until a caller needs it, then memoized on the entry. There
//! is no TTL: staleness is driven entirely by explicit invalidation
//! after a confirmed write, under the single-writer assumption (this
//! service is the only writer of the contract).
//!
//! The cache is an explicit object owned by the application state and
//! injected into handlers, so tests construct isolated instances.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::models::{Product, RawProduct};

/// Cached state for one product id: the raw tuple, plus the decoded
/// form once some caller has paid for decoding.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub raw: RawProduct,
    pub decoded: Option<Product>,
}

#[derive(Default)]
struct CacheInner {
    products: HashMap<String, CacheEntry>,
    listing: Option<Vec<Product>>,
}

#[derive(Default)]
pub struct ProductCache {
    inner: RwLock<CacheInner>,
}

impl ProductCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<CacheEntry> {
        self.inner.read().unwrap().products.get(id).cloned()
    }

    /// Cache the raw tuple for an id. Resets any memoized decoded form:
    /// fresh raw data supersedes whatever was decoded from the old tuple.
    pub fn put_raw(&self, id: &str, raw: RawProduct) {
        let mut inner = self.inner.write().unwrap();
        inner.products.insert(
            id.to_string(),
            CacheEntry { raw, decoded: None },
        );
    }

    pub fn put_decoded(&self, id: &str, raw: RawProduct, decoded: Product) {
        let mut inner = self.inner.write().unwrap();
        inner.products.insert(
            id.to_string(),
            CacheEntry {
                raw,
                decoded: Some(decoded),
            },
        );
    }

    pub fn listing(&self) -> Option<Vec<Product>> {
        self.inner.read().unwrap().listing.clone()
    }

    pub fn put_listing(&self, products: Vec<Product>) {
        self.inner.write().unwrap().listing = Some(products);
    }

    /// Drop the entry for an id and the full listing, unconditionally.
    /// The listing is treated as always-stale after any confirmed write,
    /// even ones that cannot change the id set.
    pub fn invalidate(&self, id: &str) {
        let mut inner = self.inner.write().unwrap();
        inner.products.remove(id);
        inner.listing = None;
    }
}
