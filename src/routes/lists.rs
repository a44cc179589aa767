//! Consolidated list route — all wishlist operations behind one
//! action-routed endpoint, mirroring how cart operations are batched.
//!
//! Validation happens before any backend call: a missing per-action field
//! returns 400 without touching the provider.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use crate::provider::types::{BackendResponse, ListUpdate, SessionCredentials, UpdateAction};
use crate::routes::{provider_message, upstream_status};
use crate::state::AppState;

pub const ACTION_FETCH_LISTS: &str = "fetchLists";
pub const ACTION_CREATE_LIST: &str = "createList";
pub const ACTION_DELETE_LIST: &str = "deleteList";
pub const ACTION_FETCH_LIST_WITH_CONTENTS: &str = "fetchListWithContents";
pub const ACTION_UPDATE_LIST: &str = "updateList";

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ListsRequestBody {
    pub action: String,
    pub regid: String,
    pub sessionid: String,
    pub list_name: Option<String>,
    pub lid: Option<String>,
    pub product_id: Option<u64>,
    pub variant_id: Option<u64>,
    pub product_url: Option<String>,
    pub update_action: Option<UpdateAction>,
}

/// `POST /api/swym` — dispatch one list operation based on `action`.
pub async fn dispatch(
    State(state): State<AppState>,
    body: Result<Json<ListsRequestBody>, JsonRejection>,
) -> Response {
    // A malformed body falls through to the action validation below.
    let body = body.map(|Json(b)| b).unwrap_or_default();

    if body.action.is_empty() {
        return validation_failure("No action provided");
    }
    if body.regid.is_empty() || body.sessionid.is_empty() {
        return validation_failure("Missing regid or sessionid");
    }

    let creds = SessionCredentials { regid: body.regid.clone(), sessionid: body.sessionid.clone() };

    let result = match body.action.as_str() {
        ACTION_FETCH_LISTS => state.backend.fetch_lists(&creds).await,
        ACTION_CREATE_LIST => {
            let Some(name) = body.list_name.as_deref().filter(|n| !n.is_empty()) else {
                return validation_failure("Missing listName");
            };
            state.backend.create_list(name, &creds).await
        }
        ACTION_DELETE_LIST => {
            let Some(lid) = body.lid.as_deref().filter(|l| !l.is_empty()) else {
                return validation_failure("Missing lid (list ID)");
            };
            state.backend.delete_list(lid, &creds).await
        }
        ACTION_FETCH_LIST_WITH_CONTENTS => {
            let Some(lid) = body.lid.as_deref().filter(|l| !l.is_empty()) else {
                return validation_failure("Missing lid (list ID)");
            };
            state.backend.fetch_list_with_contents(lid, &creds).await
        }
        ACTION_UPDATE_LIST => {
            let Some(update) = build_update(&body) else {
                return validation_failure("Missing required parameters for updateList");
            };
            state.backend.update_list(&update, &creds).await
        }
        other => return validation_failure(&format!("Unknown action: {other}")),
    };

    match result {
        Ok(resp) => envelope_response(resp),
        Err(e) => {
            tracing::error!(error = %e, action = %body.action, "list operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": true, "message": "Internal server error" })),
            )
                .into_response()
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn build_update(body: &ListsRequestBody) -> Option<ListUpdate> {
    Some(ListUpdate {
        list_id: body.lid.clone().filter(|l| !l.is_empty())?,
        product_id: body.product_id?,
        variant_id: body.variant_id?,
        product_url: body.product_url.clone().filter(|u| !u.is_empty())?,
        action: body.update_action?,
    })
}

fn validation_failure(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": true, "message": message })),
    )
        .into_response()
}

/// Surface the provider result as the uniform envelope. The HTTP status and
/// the envelope's `status` both carry the mapped value.
fn envelope_response(resp: BackendResponse) -> Response {
    let status = upstream_status(resp.status);

    let mut body = serde_json::json!({
        "ok": resp.ok,
        "status": status.as_u16(),
        "data": resp.data,
    });
    if !resp.ok {
        body["error"] = serde_json::Value::Bool(true);
        body["message"] = serde_json::Value::String(provider_message(&resp.data));
    }

    (status, Json(body)).into_response()
}

#[cfg(test)]
#[path = "lists_test.rs"]
mod tests;
