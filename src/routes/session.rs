//! Session routes — regid generation and guest-to-customer sync.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::config::DEFAULT_APP_ID;
use crate::provider::types::{BackendResponse, DeviceType, GuestIdentity, detect_device_type};
use crate::routes::{provider_message, upstream_status};
use crate::state::AppState;

#[derive(Deserialize, Default)]
pub struct GenerateRegidBody {
    pub useragenttype: Option<DeviceType>,
    #[serde(rename = "appId")]
    pub app_id: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct ValidateSyncBody {
    pub regid: Option<String>,
    pub useragenttype: Option<DeviceType>,
}

/// `POST /api/generateRegid` — establish a fresh session identifier pair.
///
/// A logged-in customer (resolved by the identity seam) gets a
/// customer-linked regid; guests get one keyed to a fresh UUID.
pub async fn generate_regid(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<GenerateRegidBody>, JsonRejection>,
) -> Response {
    // All fields are optional; a missing or malformed body means defaults.
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let device = resolve_device(body.useragenttype, &headers);
    let app_id = body.app_id.unwrap_or_else(|| DEFAULT_APP_ID.to_owned());

    let identity = match state.identity.customer_email(&headers).await {
        Some(email) => GuestIdentity::Email(email),
        None => GuestIdentity::Uuid(Uuid::new_v4().to_string()),
    };

    match state.backend.generate_regid(device, &app_id, identity).await {
        Ok(resp) => session_response(resp),
        Err(e) => {
            tracing::error!(error = %e, "generate-regid request failed");
            session_failure(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

/// `POST /api/validateSyncRegid` — exchange a guest regid for a
/// customer-linked pair. Requires an authenticated caller with a resolvable
/// email; 401 otherwise.
pub async fn validate_sync_regid(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ValidateSyncBody>, JsonRejection>,
) -> Response {
    // A malformed body simply fails the regid requirement below.
    let body = body.map(|Json(b)| b).unwrap_or_default();

    let Some(regid) = body.regid.filter(|r| !r.is_empty()) else {
        return session_failure(StatusCode::BAD_REQUEST, "Missing required parameter: regid");
    };

    let Some(email) = state.identity.customer_email(&headers).await else {
        return session_failure(
            StatusCode::UNAUTHORIZED,
            "User must be logged in with valid email to sync guest wishlist",
        );
    };

    let device = resolve_device(body.useragenttype, &headers);

    match state.backend.guest_validate_sync(&regid, device, &email).await {
        Ok(resp) => session_response(resp),
        Err(e) => {
            tracing::error!(error = %e, "guest-validate-sync request failed");
            session_failure(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Prefer the caller-supplied device type, fall back to sniffing the
/// `User-Agent` header.
fn resolve_device(explicit: Option<DeviceType>, headers: &HeaderMap) -> DeviceType {
    explicit.unwrap_or_else(|| {
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map_or(DeviceType::Unknown, detect_device_type)
    })
}

/// Wrap a provider response: success carries the raw body under
/// `swymResponse`, failure maps the upstream status (4xx through, 5xx to
/// 502) with a best-effort message.
fn session_response(resp: BackendResponse) -> Response {
    if resp.ok {
        return (StatusCode::OK, Json(serde_json::json!({ "swymResponse": resp.data }))).into_response();
    }

    tracing::error!(status = resp.status, "wishlist provider error response");
    session_failure(upstream_status(resp.status), &provider_message(&resp.data))
}

fn session_failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": true,
            "message": message,
            "swymResponse": null,
        })),
    )
        .into_response()
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
