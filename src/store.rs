//! Wishlist membership store.
//!
//! DESIGN
//! ======
//! In-memory state (session credentials, list collection, selected list id)
//! with every mutation written through to the storage adapter. Rehydration
//! happens on construction; each blob falls back independently, so a
//! selected id with no matching list is possible and callers must tolerate
//! it.
//!
//! Overlapping list refreshes are sequenced by a generation counter: only
//! the commit carrying the latest generation token wins, so a slow stale
//! fetch can't overwrite a newer collection.

use std::sync::Arc;

use crate::provider::types::{List, SessionCredentials};
use crate::storage::{StorageAdapter, load_json, save_json};

// Key names predate this crate; embedders migrating an existing
// localStorage-style layout keep their data.
pub const SESSION_KEY: &str = "swym-data";
pub const LISTS_KEY: &str = "swym-list-data";
pub const SELECTED_KEY: &str = "swym-list-id";

/// Token returned by [`WishlistStore::begin_refresh`]; a list commit is
/// accepted only while its token is the latest one handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshToken(u64);

pub struct WishlistStore {
    storage: Arc<dyn StorageAdapter>,
    credentials: Option<SessionCredentials>,
    lists: Vec<List>,
    selected_list_id: String,
    refresh_generation: u64,
}

impl WishlistStore {
    /// Rehydrate from storage. Corrupt or missing blobs fall back to
    /// defaults per key.
    #[must_use]
    pub fn open(storage: Arc<dyn StorageAdapter>) -> Self {
        let credentials = load_json::<Option<SessionCredentials>>(storage.as_ref(), SESSION_KEY, None);
        let lists = load_json::<Vec<List>>(storage.as_ref(), LISTS_KEY, Vec::new());
        let selected_list_id = load_json::<String>(storage.as_ref(), SELECTED_KEY, String::new());

        Self { storage, credentials, lists, selected_list_id, refresh_generation: 0 }
    }

    // -- session ------------------------------------------------------------

    #[must_use]
    pub fn credentials(&self) -> Option<&SessionCredentials> {
        self.credentials.as_ref()
    }

    /// Replace the session credentials wholesale and persist them.
    pub fn set_credentials(&mut self, creds: SessionCredentials) {
        self.credentials = Some(creds);
        save_json(self.storage.as_ref(), SESSION_KEY, &self.credentials);
    }

    /// "Initialized" is purely "credentials present".
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.credentials.is_some()
    }

    // -- lists --------------------------------------------------------------

    #[must_use]
    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    #[must_use]
    pub fn selected_list_id(&self) -> &str {
        &self.selected_list_id
    }

    pub fn set_selected_list_id(&mut self, id: impl Into<String>) {
        self.selected_list_id = id.into();
        save_json(self.storage.as_ref(), SELECTED_KEY, &self.selected_list_id);
    }

    /// Start a list refresh, invalidating any earlier in-flight token.
    pub fn begin_refresh(&mut self) -> RefreshToken {
        self.refresh_generation += 1;
        RefreshToken(self.refresh_generation)
    }

    /// Commit a refreshed collection. Returns false (dropping the data) when
    /// a newer refresh has started since the token was issued.
    pub fn commit_lists(&mut self, token: RefreshToken, lists: Vec<List>) -> bool {
        if token.0 != self.refresh_generation {
            tracing::debug!(stale = token.0, current = self.refresh_generation, "dropping stale list refresh");
            return false;
        }
        self.lists = lists;
        save_json(self.storage.as_ref(), LISTS_KEY, &self.lists);
        true
    }

    /// Replace the collection unconditionally (bootstrap path, where no
    /// concurrent refresh exists yet).
    pub fn set_lists(&mut self, lists: Vec<List>) {
        let token = self.begin_refresh();
        self.commit_lists(token, lists);
    }

    /// Membership scan across every list: true when any list contains the
    /// `(product, variant)` pair.
    #[must_use]
    pub fn contains(&self, product_id: u64, variant_id: u64) -> bool {
        self.lists.iter().any(|list| {
            list.contents
                .iter()
                .any(|item| item.product_id == product_id && item.variant_id == variant_id)
        })
    }

    // -- reset --------------------------------------------------------------

    /// Drop all state and remove the persisted blobs.
    pub fn reset(&mut self) {
        self.storage.remove(SESSION_KEY);
        self.storage.remove(LISTS_KEY);
        self.storage.remove(SELECTED_KEY);

        self.credentials = None;
        self.lists.clear();
        self.selected_list_id.clear();
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
