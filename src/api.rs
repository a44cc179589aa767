//! Gateway API client — the storefront-side half of the passthrough pair.
//!
//! Every operation issues one JSON POST to a gateway route and returns the
//! uniform [`ApiResult`] envelope. Transport and decode failures degrade to
//! an error envelope instead of propagating; wishlist functionality is
//! best-effort on top of the storefront.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::DEFAULT_APP_ID;
use crate::provider::types::{DeviceType, List, ListUpdate, SessionCredentials, UpdateAction};

const REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// ENVELOPE
// =============================================================================

/// Uniform result shape for every gateway call.
#[derive(Debug, Clone)]
pub struct ApiResult<T> {
    pub ok: bool,
    pub status: u16,
    pub data: Option<T>,
    pub error: Option<bool>,
    pub message: Option<String>,
}

impl<T> ApiResult<T> {
    #[must_use]
    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self { ok: false, status, data: None, error: Some(true), message: Some(message.into()) }
    }
}

// =============================================================================
// API TRAIT
// =============================================================================

/// Client-side wishlist operations, mockable for flow tests.
#[async_trait::async_trait]
pub trait WishlistApi: Send + Sync {
    /// Establish a fresh `{regid, sessionid}` pair.
    async fn generate_regid(&self) -> ApiResult<SessionCredentials>;

    /// Exchange a guest regid for a customer-linked pair after login.
    async fn sync_guest_regid(&self, regid: &str) -> ApiResult<SessionCredentials>;

    async fn fetch_lists(&self, creds: &SessionCredentials) -> ApiResult<Vec<List>>;

    async fn create_list(&self, name: &str, creds: &SessionCredentials) -> ApiResult<List>;

    async fn delete_list(&self, lid: &str, creds: &SessionCredentials) -> ApiResult<serde_json::Value>;

    async fn fetch_list_with_contents(&self, lid: &str, creds: &SessionCredentials) -> ApiResult<List>;

    async fn update_list(&self, update: &ListUpdate, creds: &SessionCredentials) -> ApiResult<serde_json::Value>;
}

// =============================================================================
// HTTP IMPLEMENTATION
// =============================================================================

pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
    device: DeviceType,
}

impl HttpApi {
    /// Build a client against the gateway's base URL.
    ///
    /// # Errors
    ///
    /// Returns the reqwest build error if the client cannot be constructed.
    pub fn new(base_url: impl Into<String>, device: DeviceType) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, base_url: base_url.into().trim_end_matches('/').to_owned(), device })
    }

    async fn post_json(&self, path: &str, body: serde_json::Value) -> Result<(bool, u16, serde_json::Value), String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        let value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| e.to_string())?;
        Ok((status.is_success(), status.as_u16(), value))
    }

    async fn session_call(&self, path: &str, body: serde_json::Value) -> ApiResult<SessionCredentials> {
        match self.post_json(path, body).await {
            Ok((http_ok, status, value)) => parse_session_response(http_ok, status, &value),
            Err(message) => {
                tracing::error!(%path, %message, "gateway request failed");
                ApiResult::failure(500, message)
            }
        }
    }

    async fn lists_call<T: DeserializeOwned>(&self, body: serde_json::Value) -> ApiResult<T> {
        match self.post_json("/api/swym", body).await {
            Ok((http_ok, status, value)) => parse_envelope(http_ok, status, value),
            Err(message) => {
                tracing::error!(%message, "gateway request failed");
                ApiResult::failure(500, message)
            }
        }
    }
}

#[async_trait::async_trait]
impl WishlistApi for HttpApi {
    async fn generate_regid(&self) -> ApiResult<SessionCredentials> {
        let body = serde_json::json!({
            "appId": DEFAULT_APP_ID,
            "useragenttype": self.device,
        });
        self.session_call("/api/generateRegid", body).await
    }

    async fn sync_guest_regid(&self, regid: &str) -> ApiResult<SessionCredentials> {
        let body = serde_json::json!({
            "regid": regid,
            "useragenttype": self.device,
        });
        self.session_call("/api/validateSyncRegid", body).await
    }

    async fn fetch_lists(&self, creds: &SessionCredentials) -> ApiResult<Vec<List>> {
        self.lists_call(serde_json::json!({
            "action": "fetchLists",
            "regid": creds.regid,
            "sessionid": creds.sessionid,
        }))
        .await
    }

    async fn create_list(&self, name: &str, creds: &SessionCredentials) -> ApiResult<List> {
        self.lists_call(serde_json::json!({
            "action": "createList",
            "listName": name,
            "regid": creds.regid,
            "sessionid": creds.sessionid,
        }))
        .await
    }

    async fn delete_list(&self, lid: &str, creds: &SessionCredentials) -> ApiResult<serde_json::Value> {
        self.lists_call(serde_json::json!({
            "action": "deleteList",
            "lid": lid,
            "regid": creds.regid,
            "sessionid": creds.sessionid,
        }))
        .await
    }

    async fn fetch_list_with_contents(&self, lid: &str, creds: &SessionCredentials) -> ApiResult<List> {
        self.lists_call(serde_json::json!({
            "action": "fetchListWithContents",
            "lid": lid,
            "regid": creds.regid,
            "sessionid": creds.sessionid,
        }))
        .await
    }

    async fn update_list(&self, update: &ListUpdate, creds: &SessionCredentials) -> ApiResult<serde_json::Value> {
        let action = match update.action {
            UpdateAction::Add => "add",
            UpdateAction::Remove => "remove",
        };
        self.lists_call(serde_json::json!({
            "action": "updateList",
            "productId": update.product_id,
            "variantId": update.variant_id,
            "productUrl": update.product_url,
            "lid": update.list_id,
            "regid": creds.regid,
            "sessionid": creds.sessionid,
            "updateAction": action,
        }))
        .await
    }
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

/// Decode a session route response: success carries `{swymResponse:
/// {regid, sessionid}}`, anything else becomes an error envelope with the
/// body's message when present.
fn parse_session_response(http_ok: bool, status: u16, value: &serde_json::Value) -> ApiResult<SessionCredentials> {
    if http_ok {
        if let Some(creds) = value
            .get("swymResponse")
            .and_then(|v| serde_json::from_value::<SessionCredentials>(v.clone()).ok())
        {
            return ApiResult { ok: true, status, data: Some(creds), error: None, message: None };
        }
    }

    let message = value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("Wishlist session request failed")
        .to_owned();
    tracing::warn!(status, %message, "session request rejected");
    ApiResult::failure(status, message)
}

/// Decode the consolidated route's envelope, deferring to the HTTP outcome
/// for any field the body omits.
fn parse_envelope<T: DeserializeOwned>(http_ok: bool, http_status: u16, value: serde_json::Value) -> ApiResult<T> {
    let ok = value.get("ok").and_then(serde_json::Value::as_bool).unwrap_or(http_ok);
    let status = value
        .get("status")
        .and_then(serde_json::Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
        .unwrap_or(http_status);
    let error = value.get("error").and_then(serde_json::Value::as_bool);
    let message = value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned);
    let data = value
        .get("data")
        .cloned()
        .and_then(|d| serde_json::from_value::<T>(d).ok());

    ApiResult { ok, status, data, error, message }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
