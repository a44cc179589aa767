//! HTTP client for the wishlist provider's REST API.
//!
//! Two families of endpoints with different auth:
//! - `/storeadmin/v3/user/*` take a Basic auth header built from the store
//!   id and API key.
//! - `/api/v3/lists/*` take an `x-api-key` header plus a `pid` query
//!   parameter.
//!
//! Everything is form-encoded. The update-ctx payload embeds a one-element
//! JSON array as a string inside a form field; that format is a fixed
//! external contract and must not change.

use std::time::Duration;

use base64::Engine as _;

use super::WishlistBackend;
use super::types::{
    BackendResponse, DeviceType, GuestIdentity, ListUpdate, ProviderError, SessionCredentials, UpdateAction,
};
use crate::config::ProviderConfig;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("wishgate/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// CLIENT
// =============================================================================

pub struct ProviderClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl ProviderClient {
    /// Build a client with fixed request/connect timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// POST form-encoded params to a `/api/v3/lists/*` endpoint.
    async fn call_lists_api(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<BackendResponse, ProviderError> {
        let url = format!("{}{}", self.config.endpoint, endpoint);

        let response = self
            .http
            .post(&url)
            .query(&[("pid", self.config.pid.as_str())])
            .header("Accept", "application/json")
            .header("x-api-key", &self.config.api_key)
            .header("user-agent", USER_AGENT)
            .form(params)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        read_response(response).await
    }

    /// POST form-encoded params to a `/storeadmin/v3/user/*` endpoint.
    async fn call_user_api(
        &self,
        url: &str,
        query: &[(&str, &str)],
        params: &[(&str, String)],
    ) -> Result<BackendResponse, ProviderError> {
        let auth = encode_basic_auth(&self.config.pid, &self.config.api_key);

        let response = self
            .http
            .post(url)
            .query(query)
            .header("Authorization", auth)
            .header("user-agent", USER_AGENT)
            .form(params)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        read_response(response).await
    }
}

#[async_trait::async_trait]
impl WishlistBackend for ProviderClient {
    async fn generate_regid(
        &self,
        device: DeviceType,
        app_id: &str,
        identity: GuestIdentity,
    ) -> Result<BackendResponse, ProviderError> {
        let url = format!("{}/storeadmin/v3/user/generate-regid", self.config.endpoint);

        let mut params = vec![("useragenttype", device.as_str().to_owned())];
        match identity {
            GuestIdentity::Email(email) => params.push(("useremail", email)),
            GuestIdentity::Uuid(uuid) => params.push(("uuid", uuid)),
        }

        self.call_user_api(&url, &[("appId", app_id)], &params).await
    }

    async fn guest_validate_sync(
        &self,
        regid: &str,
        device: DeviceType,
        email: &str,
    ) -> Result<BackendResponse, ProviderError> {
        let url = format!("{}/storeadmin/v3/user/guest-validate-sync", self.config.endpoint);
        let params = [
            ("useragenttype", device.as_str().to_owned()),
            ("regid", regid.to_owned()),
            ("useremail", email.to_owned()),
        ];
        self.call_user_api(&url, &[], &params).await
    }

    async fn fetch_lists(&self, creds: &SessionCredentials) -> Result<BackendResponse, ProviderError> {
        let params = [("regid", creds.regid.clone()), ("sessionid", creds.sessionid.clone())];
        self.call_lists_api("/api/v3/lists/fetch-lists", &params).await
    }

    async fn create_list(&self, name: &str, creds: &SessionCredentials) -> Result<BackendResponse, ProviderError> {
        let params = [
            ("regid", creds.regid.clone()),
            ("sessionid", creds.sessionid.clone()),
            ("lname", name.to_owned()),
        ];
        self.call_lists_api("/api/v3/lists/create", &params).await
    }

    async fn delete_list(&self, lid: &str, creds: &SessionCredentials) -> Result<BackendResponse, ProviderError> {
        let params = [
            ("regid", creds.regid.clone()),
            ("sessionid", creds.sessionid.clone()),
            ("lid", lid.to_owned()),
        ];
        self.call_lists_api("/api/v3/lists/delete-list", &params).await
    }

    async fn fetch_list_with_contents(
        &self,
        lid: &str,
        creds: &SessionCredentials,
    ) -> Result<BackendResponse, ProviderError> {
        let params = [
            ("regid", creds.regid.clone()),
            ("sessionid", creds.sessionid.clone()),
            ("lid", lid.to_owned()),
        ];
        self.call_lists_api("/api/v3/lists/fetch-list-with-contents", &params).await
    }

    async fn update_list(
        &self,
        update: &ListUpdate,
        creds: &SessionCredentials,
    ) -> Result<BackendResponse, ProviderError> {
        // 'a' adds, 'd' deletes. The value is a JSON array serialized into
        // the form field, exactly as the provider expects it.
        let field = match update.action {
            UpdateAction::Add => "a",
            UpdateAction::Remove => "d",
        };
        let params = [
            ("regid", creds.regid.clone()),
            ("sessionid", creds.sessionid.clone()),
            ("lid", update.list_id.clone()),
            (field, update_payload(update)),
        ];
        self.call_lists_api("/api/v3/lists/update-ctx", &params).await
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Serialize the target item as the provider's one-element array string.
fn update_payload(update: &ListUpdate) -> String {
    format!(
        r#"[{{ "epi":{},"empi":{},"du":"{}"}}]"#,
        update.variant_id, update.product_id, update.product_url
    )
}

/// `Basic <base64(username:password)>` header value.
fn encode_basic_auth(username: &str, password: &str) -> String {
    let credentials = format!("{username}:{password}");
    let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
    format!("Basic {encoded}")
}

/// Decode the provider response into a raw status + JSON body pair. A body
/// that is not JSON becomes `Value::Null` rather than an error so upstream
/// status mapping still applies.
async fn read_response(response: reqwest::Response) -> Result<BackendResponse, ProviderError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ProviderError::Request(e.to_string()))?;
    let data = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);

    Ok(BackendResponse { ok: status.is_success(), status: status.as_u16(), data })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
