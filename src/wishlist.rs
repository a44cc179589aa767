//! Wishlist surface — the per-product toggle and the list view resolver.
//!
//! The toggle derives membership by scanning the stored collection; a click
//! issues add or remove and then re-fetches the collection so derived state
//! resyncs from the source of truth (no optimistic local mutation). The
//! loading guard refuses repeat clicks while a request is in flight.

use crate::api::WishlistApi;
use crate::catalog::{CatalogLookup, Product};
use crate::provider::types::{ListUpdate, UpdateAction, extract_product_id};
use crate::store::WishlistStore;

// =============================================================================
// TOGGLE
// =============================================================================

/// Outcome of a toggle attempt, for the embedding UI to render from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The membership change was applied; `wishlisted` is the new state.
    Applied { wishlisted: bool },
    /// Store not initialized or no list selected; nothing was sent.
    NotReady,
    /// A previous toggle is still in flight; this click was dropped.
    InFlight,
    /// The add/remove call failed; membership is unchanged.
    Failed,
}

pub struct WishlistToggle {
    product_id: u64,
    variant_id: u64,
    product_url: String,
    loading: bool,
}

impl WishlistToggle {
    #[must_use]
    pub fn new(product_id: u64, variant_id: u64, product_url: impl Into<String>) -> Self {
        Self { product_id, variant_id, product_url: product_url.into(), loading: false }
    }

    /// Build a toggle from Shopify gid strings, the way product cards supply
    /// their ids. Returns `None` when either gid carries no numeric tail.
    #[must_use]
    pub fn from_gids(product_gid: &str, variant_gid: &str, product_url: impl Into<String>) -> Option<Self> {
        let product_id = extract_product_id(product_gid)?;
        let variant_id = extract_product_id(variant_gid)?;
        Some(Self::new(product_id, variant_id, product_url))
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Membership scan across the full collection for this
    /// `(product, variant)` pair.
    #[must_use]
    pub fn is_wishlisted(&self, store: &WishlistStore) -> bool {
        store.contains(self.product_id, self.variant_id)
    }

    /// Flip membership on the selected list, then re-fetch the collection to
    /// resync. The refresh commit is generation-sequenced so a stale
    /// overlapping fetch can't clobber it.
    pub async fn toggle(&mut self, api: &dyn WishlistApi, store: &mut WishlistStore) -> ToggleOutcome {
        if self.loading {
            return ToggleOutcome::InFlight;
        }
        if !store.is_initialized() || store.selected_list_id().is_empty() {
            tracing::warn!("wishlist not initialized yet, ignoring toggle");
            return ToggleOutcome::NotReady;
        }
        let Some(creds) = store.credentials().cloned() else {
            return ToggleOutcome::NotReady;
        };

        self.loading = true;

        let action = if self.is_wishlisted(store) { UpdateAction::Remove } else { UpdateAction::Add };
        let update = ListUpdate {
            list_id: store.selected_list_id().to_owned(),
            product_id: self.product_id,
            variant_id: self.variant_id,
            product_url: self.product_url.clone(),
            action,
        };

        let result = api.update_list(&update, &creds).await;
        let outcome = if result.ok {
            let token = store.begin_refresh();
            let refreshed = api.fetch_lists(&creds).await;
            if let Some(lists) = refreshed.data {
                store.commit_lists(token, lists);
            }
            ToggleOutcome::Applied { wishlisted: action == UpdateAction::Add }
        } else {
            tracing::error!(
                status = result.status,
                message = result.message.as_deref().unwrap_or_default(),
                "wishlist update failed"
            );
            ToggleOutcome::Failed
        };

        self.loading = false;
        outcome
    }
}

// =============================================================================
// LIST VIEW
// =============================================================================

/// Resolve the selected list's contents to catalog products. Invalid
/// product refs are filtered out; any failure yields an empty vec, which the
/// UI renders as the empty state.
pub async fn load_wishlist_products(
    api: &dyn WishlistApi,
    catalog: &dyn CatalogLookup,
    store: &WishlistStore,
) -> Vec<Product> {
    let selected = store.selected_list_id();
    let Some(creds) = store.credentials() else {
        return Vec::new();
    };
    if selected.is_empty() {
        return Vec::new();
    }

    let response = api.fetch_list_with_contents(selected, creds).await;
    let Some(list) = response.data else {
        tracing::error!(
            status = response.status,
            message = response.message.as_deref().unwrap_or_default(),
            "failed to fetch wishlist contents"
        );
        return Vec::new();
    };

    let product_ids: Vec<u64> = list.contents.iter().map(|item| item.product_id).filter(|id| *id > 0).collect();
    if product_ids.is_empty() {
        return Vec::new();
    }

    catalog.products_by_ids(&product_ids).await
}

#[cfg(test)]
#[path = "wishlist_test.rs"]
mod tests;
