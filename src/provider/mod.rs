//! Provider — client for the external wishlist REST backend.
//!
//! DESIGN
//! ======
//! The backend is an external collaborator reachable only over HTTP. All
//! operations go through the [`WishlistBackend`] trait so gateway routes can
//! be tested against a mock instead of the live service. [`ProviderClient`]
//! is the real reqwest-backed implementation.

pub mod client;
pub mod types;

pub use client::ProviderClient;
use types::{BackendResponse, DeviceType, GuestIdentity, ListUpdate, ProviderError, SessionCredentials};

// =============================================================================
// BACKEND TRAIT
// =============================================================================

/// Operations against the wishlist provider's REST surface. One HTTP request
/// per call; no retries, no pagination.
#[async_trait::async_trait]
pub trait WishlistBackend: Send + Sync {
    /// Register a new session, returning `{regid, sessionid}` in the body.
    async fn generate_regid(
        &self,
        device: DeviceType,
        app_id: &str,
        identity: GuestIdentity,
    ) -> Result<BackendResponse, ProviderError>;

    /// Exchange a guest regid for a customer-linked identifier pair.
    async fn guest_validate_sync(
        &self,
        regid: &str,
        device: DeviceType,
        email: &str,
    ) -> Result<BackendResponse, ProviderError>;

    /// Fetch all lists for a session.
    async fn fetch_lists(&self, creds: &SessionCredentials) -> Result<BackendResponse, ProviderError>;

    /// Create a named list.
    async fn create_list(&self, name: &str, creds: &SessionCredentials) -> Result<BackendResponse, ProviderError>;

    /// Delete a list by id.
    async fn delete_list(&self, lid: &str, creds: &SessionCredentials) -> Result<BackendResponse, ProviderError>;

    /// Fetch a single list including its contents.
    async fn fetch_list_with_contents(
        &self,
        lid: &str,
        creds: &SessionCredentials,
    ) -> Result<BackendResponse, ProviderError>;

    /// Add or remove one item from a list.
    async fn update_list(
        &self,
        update: &ListUpdate,
        creds: &SessionCredentials,
    ) -> Result<BackendResponse, ProviderError>;
}
