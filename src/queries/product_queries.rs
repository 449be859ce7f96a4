//! Cache-aware read paths against the ledger.
//!
//! Every miss goes through the retry policy; every fetched tuple is
//! cached before use. A `None` from the lookup functions means the
//! ledger reports the product as nonexistent, an expected business
//! outcome, distinct from read failures which surface as errors.

use crate::AppState;
use crate::ledger::{LedgerClient, LedgerResult};
use crate::models::{Product, RawProduct};

pub async fn find_raw(state: &AppState, id: &str) -> LedgerResult<Option<RawProduct>> {
    if let Some(entry) = state.cache.get(id) {
        tracing::debug!("Serving product {} from cache", id);
        return Ok(Some(entry.raw));
    }

    match state.retry.run(|| state.ledger.get_product(id)).await {
        Ok(raw) => {
            state.cache.put_raw(id, raw.clone());
            Ok(Some(raw))
        }
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Fully decoded product for an id, memoizing the decoded form on the
/// cache entry. Tombstones (empty id) read as absent.
pub async fn find_decoded(state: &AppState, id: &str) -> LedgerResult<Option<Product>> {
    if let Some(entry) = state.cache.get(id) {
        if let Some(product) = entry.decoded {
            tracing::debug!("Serving decoded product {} from cache", id);
            return Ok(Some(product));
        }
    }

    let Some(raw) = find_raw(state, id).await? else {
        return Ok(None);
    };
    if raw.is_tombstone() {
        return Ok(None);
    }

    let product = Product::from_raw(&raw);
    state.cache.put_decoded(id, raw, product.clone());
    Ok(Some(product))
}

/// The full listing, rebuilt on cache miss by enumerating ids and
/// fetching each product, skipping tombstones.
pub async fn find_all(state: &AppState) -> LedgerResult<Vec<Product>> {
    if let Some(products) = state.cache.listing() {
        tracing::debug!("Serving product listing from cache");
        return Ok(products);
    }

    let count = state.retry.run(|| state.ledger.get_product_count()).await?;
    let ids = state
        .retry
        .run(|| state.ledger.get_product_ids(0, count))
        .await?;

    let mut products = Vec::with_capacity(ids.len());
    for id in &ids {
        let Some(raw) = find_raw(state, id).await? else {
            continue;
        };
        if raw.is_tombstone() {
            continue;
        }
        products.push(Product::from_raw(&raw));
    }

    state.cache.put_listing(products.clone());
    tracing::info!("Rebuilt product listing with {} products", products.len());
    Ok(products)
}
