//! Provider types — wishlist backend wire types and errors.
//!
//! Field names follow the provider's REST contract (`lid`, `epi`, `empi`,
//! ...) so payloads round-trip unchanged. Rust-side names stay readable via
//! `#[serde(rename)]`.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by wishlist backend operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request to the provider failed before a response arrived.
    #[error("provider request failed: {0}")]
    Request(String),

    /// The provider response body could not be deserialized.
    #[error("provider response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// SESSION
// =============================================================================

/// Opaque session identifier pair issued by the provider. Identifies an
/// anonymous-or-customer-linked session; replaced wholesale on login sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredentials {
    pub regid: String,
    pub sessionid: String,
}

/// Identity attached to a generate-regid call: the customer's email when one
/// is logged in, otherwise a fresh UUID for the anonymous guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestIdentity {
    Email(String),
    Uuid(String),
}

// =============================================================================
// LISTS
// =============================================================================

/// A single item inside a wishlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItem {
    /// Variant reference (provider field `epi`).
    #[serde(rename = "epi")]
    pub variant_id: u64,
    /// Product reference (provider field `empi`).
    #[serde(rename = "empi")]
    pub product_id: u64,
    /// Product URL (provider field `du`).
    #[serde(rename = "du")]
    pub product_url: String,
    #[serde(rename = "iu", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "dt", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "pr", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// A named wishlist. `contents` is only populated by the
/// fetch-list-with-contents and fetch-lists calls; membership changes go
/// through update-ctx followed by a re-fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct List {
    #[serde(rename = "lid")]
    pub id: String,
    #[serde(rename = "lname")]
    pub name: String,
    #[serde(rename = "listcontents", default)]
    pub contents: Vec<ListItem>,
    #[serde(rename = "cnt", skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// Discriminator for the single update-ctx endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateAction {
    Add,
    Remove,
}

/// Parameters for a membership update against one list.
#[derive(Debug, Clone)]
pub struct ListUpdate {
    pub list_id: String,
    pub product_id: u64,
    pub variant_id: u64,
    pub product_url: String,
    pub action: UpdateAction,
}

// =============================================================================
// DEVICE TYPE
// =============================================================================

/// Device classification the provider uses for session tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Desktop,
    Tablet,
    #[default]
    Unknown,
}

impl DeviceType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Unknown => "unknown",
        }
    }
}

/// Classify a raw `User-Agent` string. Tablets are checked before desktop so
/// iPads and non-mobile Android devices don't fall into the desktop bucket.
#[must_use]
pub fn detect_device_type(user_agent: &str) -> DeviceType {
    let ua = user_agent.to_ascii_lowercase();

    let is_android = ua.contains("android");
    let android_mobile = is_android && ua.contains("mobile");

    if android_mobile
        || ["iphone", "ipod", "blackberry", "phone"].iter().any(|m| ua.contains(m))
        || (ua.contains("mobile") && !is_android)
    {
        return DeviceType::Mobile;
    }

    if ua.contains("ipad") || is_android || ua.contains("tablet") {
        return DeviceType::Tablet;
    }

    if ["windows", "macintosh", "linux"].iter().any(|m| ua.contains(m)) {
        return DeviceType::Desktop;
    }

    DeviceType::Unknown
}

/// Extract the numeric id from a Shopify gid (`gid://shopify/Product/123`
/// -> `123`). Plain numeric strings pass through unchanged.
#[must_use]
pub fn extract_product_id(raw: &str) -> Option<u64> {
    let tail = raw.rfind('/').map_or(raw, |i| &raw[i + 1..]);
    tail.parse().ok()
}

// =============================================================================
// RAW RESPONSE
// =============================================================================

/// Raw provider response: HTTP outcome plus the undecoded JSON body. The
/// gateway routes forward this as-is; the client half types the payload.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub ok: bool,
    pub status: u16,
    pub data: serde_json::Value,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
