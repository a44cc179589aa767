//! Session bootstrap and guest-to-customer login sync.
//!
//! DESIGN
//! ======
//! The original effect-driven flow guarded itself with one-shot "already
//! attempted" flags. Here each flow is an explicit state machine so
//! re-entrancy and idempotency are checkable: re-running after a failure
//! never re-issues the request, matching the no-retry failure policy (state
//! stays uninitialized indefinitely).
//!
//! Phases: `Uninitialized -> SessionPending -> SessionReady -> ListsPending
//! -> Ready`. A failed transition parks the machine in its pending phase.

use crate::api::WishlistApi;
use crate::config::DEFAULT_LIST_NAME;
use crate::store::WishlistStore;

// =============================================================================
// SESSION BOOTSTRAP
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No session attempt made yet.
    Uninitialized,
    /// Session generation attempted; credentials not yet committed.
    SessionPending,
    /// Credentials committed; list collection not yet populated.
    SessionReady,
    /// List fetch-or-create attempted; collection not yet committed.
    ListsPending,
    /// Credentials and list collection both committed.
    Ready,
}

pub struct SessionBootstrap {
    phase: Phase,
}

impl Default for SessionBootstrap {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBootstrap {
    #[must_use]
    pub fn new() -> Self {
        Self { phase: Phase::Uninitialized }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Drive the bootstrap as far as it can go. Safe to call on every
    /// render: each network phase runs at most once, and a phase that
    /// already failed is never re-entered.
    pub async fn run(&mut self, api: &dyn WishlistApi, store: &mut WishlistStore) {
        if self.phase == Phase::Uninitialized {
            self.ensure_session(api, store).await;
        }
        if self.phase == Phase::SessionReady {
            self.ensure_lists(api, store).await;
        }
    }

    /// Phase one: adopt cached credentials, or request a fresh pair.
    async fn ensure_session(&mut self, api: &dyn WishlistApi, store: &mut WishlistStore) {
        if store.credentials().is_some() {
            self.phase = Phase::SessionReady;
            return;
        }

        self.phase = Phase::SessionPending;

        let response = api.generate_regid().await;
        match response.data {
            Some(creds) => {
                store.set_credentials(creds);
                self.phase = Phase::SessionReady;
            }
            None => {
                tracing::error!(
                    status = response.status,
                    message = response.message.as_deref().unwrap_or_default(),
                    "failed to generate wishlist session"
                );
            }
        }
    }

    /// Phase two: fetch the list collection; create the default list first
    /// when none exists.
    async fn ensure_lists(&mut self, api: &dyn WishlistApi, store: &mut WishlistStore) {
        let Some(creds) = store.credentials().cloned() else {
            return;
        };

        self.phase = Phase::ListsPending;

        let response = api.fetch_lists(&creds).await;
        match response.data {
            Some(lists) if !lists.is_empty() => {
                store.set_selected_list_id(lists[0].id.clone());
                store.set_lists(lists);
                self.phase = Phase::Ready;
            }
            Some(_) => {
                let created = api.create_list(DEFAULT_LIST_NAME, &creds).await;
                let Some(list) = created.data else {
                    tracing::error!(
                        message = created.message.as_deref().unwrap_or_default(),
                        "failed to create default wishlist"
                    );
                    return;
                };
                store.set_selected_list_id(list.id.clone());

                // Re-fetch so the stored collection carries full contents.
                let refreshed = api.fetch_lists(&creds).await;
                match refreshed.data {
                    Some(lists) => store.set_lists(lists),
                    None => store.set_lists(vec![list]),
                }
                self.phase = Phase::Ready;
            }
            None => {
                tracing::error!(
                    status = response.status,
                    message = response.message.as_deref().unwrap_or_default(),
                    "failed to fetch wishlists"
                );
            }
        }
    }
}

// =============================================================================
// LOGIN SYNC
// =============================================================================

/// One-shot guest-to-customer sync, triggered by the host's login signal.
/// Exactly one validate/sync exchange per login; the stored credentials are
/// replaced wholesale with the response.
pub struct LoginSync {
    processed: bool,
}

impl Default for LoginSync {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginSync {
    #[must_use]
    pub fn new() -> Self {
        Self { processed: false }
    }

    #[must_use]
    pub fn processed(&self) -> bool {
        self.processed
    }

    /// Observe the current customer identity. Issues the sync exchange once
    /// a logged-in customer and a guest regid are both present.
    pub async fn on_login(&mut self, customer_email: Option<&str>, api: &dyn WishlistApi, store: &mut WishlistStore) {
        if self.processed || !store.is_initialized() {
            return;
        }
        let Some(_email) = customer_email.filter(|e| !e.is_empty()) else {
            return;
        };
        let Some(guest_regid) = store.credentials().map(|c| c.regid.clone()) else {
            return;
        };

        self.processed = true;

        let response = api.sync_guest_regid(&guest_regid).await;
        match response.data {
            Some(creds) => store.set_credentials(creds),
            None => {
                tracing::warn!(
                    status = response.status,
                    message = response.message.as_deref().unwrap_or_default(),
                    "guest wishlist sync failed"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod tests;
