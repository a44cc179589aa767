//! Shared application state.
//!
//! `AppState` is injected into axum handlers via the `State` extractor. Both
//! collaborators sit behind trait objects so route handlers can be tested
//! without the live provider or a real storefront session.

use std::sync::Arc;

use crate::identity::IdentityResolver;
use crate::provider::WishlistBackend;

/// Shared application state. Clone is required by axum; both fields are
/// Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn WishlistBackend>,
    pub identity: Arc<dyn IdentityResolver>,
}

impl AppState {
    #[must_use]
    pub fn new(backend: Arc<dyn WishlistBackend>, identity: Arc<dyn IdentityResolver>) -> Self {
        Self { backend, identity }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
