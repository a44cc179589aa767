//! Customer identity seam.
//!
//! The host storefront owns authentication; this gateway only needs a
//! resolvable customer email for the guest-to-customer sync exchange. The
//! default implementation trusts the `x-customer-email` header set by the
//! storefront edge in front of this service.

use axum::http::HeaderMap;

pub const CUSTOMER_EMAIL_HEADER: &str = "x-customer-email";

/// Resolve the logged-in customer's email from an incoming request, if any.
#[async_trait::async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn customer_email(&self, headers: &HeaderMap) -> Option<String>;
}

/// Header-based resolver for deployments where the storefront edge injects
/// the authenticated customer email.
pub struct HeaderIdentity;

#[async_trait::async_trait]
impl IdentityResolver for HeaderIdentity {
    async fn customer_email(&self, headers: &HeaderMap) -> Option<String> {
        let raw = headers.get(CUSTOMER_EMAIL_HEADER)?.to_str().ok()?.trim();
        if raw.is_empty() || raw == "undefined" {
            return None;
        }
        Some(raw.to_owned())
    }
}
