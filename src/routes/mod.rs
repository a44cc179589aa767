//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Three thin passthrough routes sit between the storefront front-end and
//! the wishlist provider: session generation, guest-to-customer sync, and a
//! consolidated action-routed list endpoint. Handlers validate the JSON
//! body, attach server-held credentials via the provider client, and map
//! upstream statuses into the caller's response.

pub mod lists;
pub mod session;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Gateway API routes.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/generateRegid", post(session::generate_regid))
        .route("/api/validateSyncRegid", post(session::validate_sync_regid))
        .route("/api/swym", post(lists::dispatch))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Map an upstream status onto the caller's response: client errors pass
/// through, anything from 500 up (or outside the valid range) collapses to
/// 502.
pub(crate) fn upstream_status(status: u16) -> StatusCode {
    if status >= 500 {
        return StatusCode::BAD_GATEWAY;
    }
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

/// Best-effort extraction of the provider's error message.
pub(crate) fn provider_message(data: &serde_json::Value) -> String {
    data.get("message")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("Wishlist provider request failed")
        .to_owned()
}
