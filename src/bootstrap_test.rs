use std::sync::Arc;
use std::sync::atomic::Ordering;

use super::*;
use crate::api::test_helpers::MockApi;
use crate::provider::types::{List, SessionCredentials};
use crate::storage::MemoryStore;

fn fresh_store() -> WishlistStore {
    WishlistStore::open(Arc::new(MemoryStore::new()))
}

#[tokio::test]
async fn bootstrap_reaches_ready_from_scratch() {
    let api = MockApi::new();
    let mut store = fresh_store();
    let mut bootstrap = SessionBootstrap::new();

    bootstrap.run(&api, &mut store).await;

    assert_eq!(bootstrap.phase(), Phase::Ready);
    assert!(store.is_initialized());
    assert_eq!(store.credentials().unwrap().regid, "guest-regid");
    assert_eq!(store.lists().len(), 1);
    assert_eq!(store.lists()[0].name, "My Wishlist");
    assert_eq!(store.selected_list_id(), store.lists()[0].id);
}

#[tokio::test]
async fn rapid_rerun_issues_exactly_one_session_request() {
    let mut api = MockApi::new();
    api.fail_generate = true;
    let mut store = fresh_store();
    let mut bootstrap = SessionBootstrap::new();

    bootstrap.run(&api, &mut store).await;
    bootstrap.run(&api, &mut store).await;
    bootstrap.run(&api, &mut store).await;

    assert_eq!(api.generate_calls.load(Ordering::SeqCst), 1);
    assert_eq!(bootstrap.phase(), Phase::SessionPending);
    assert!(!store.is_initialized());
}

#[tokio::test]
async fn successful_rerun_does_not_regenerate_session() {
    let api = MockApi::new();
    let mut store = fresh_store();
    let mut bootstrap = SessionBootstrap::new();

    bootstrap.run(&api, &mut store).await;
    bootstrap.run(&api, &mut store).await;

    assert_eq!(api.generate_calls.load(Ordering::SeqCst), 1);
    assert_eq!(bootstrap.phase(), Phase::Ready);
}

#[tokio::test]
async fn empty_collection_creates_exactly_one_default_list() {
    let api = MockApi::new();
    let mut store = fresh_store();
    let mut bootstrap = SessionBootstrap::new();

    bootstrap.run(&api, &mut store).await;

    assert_eq!(api.create_calls.load(Ordering::SeqCst), 1);
    // Initial fetch plus the post-create refresh.
    assert_eq!(api.fetch_lists_calls.load(Ordering::SeqCst), 2);
    assert_eq!(store.lists().len(), 1);
    assert_eq!(store.lists()[0].name, "My Wishlist");
}

#[tokio::test]
async fn existing_lists_skip_creation() {
    let existing = List {
        id: "lid-existing".into(),
        name: "Saved for later".into(),
        contents: Vec::new(),
        count: Some(0),
    };
    let api = MockApi::with_lists(vec![existing]);
    let mut store = fresh_store();
    let mut bootstrap = SessionBootstrap::new();

    bootstrap.run(&api, &mut store).await;

    assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.selected_list_id(), "lid-existing");
    assert_eq!(bootstrap.phase(), Phase::Ready);
}

#[tokio::test]
async fn cached_credentials_are_adopted_without_a_request() {
    let api = MockApi::new();
    let mut store = fresh_store();
    store.set_credentials(SessionCredentials { regid: "cached".into(), sessionid: "cached-s".into() });

    let mut bootstrap = SessionBootstrap::new();
    bootstrap.run(&api, &mut store).await;

    assert_eq!(api.generate_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.credentials().unwrap().regid, "cached");
    assert_eq!(bootstrap.phase(), Phase::Ready);
}

#[tokio::test]
async fn list_fetch_failure_parks_machine_without_retry() {
    let mut api = MockApi::new();
    api.fail_fetch_lists = true;
    let mut store = fresh_store();
    let mut bootstrap = SessionBootstrap::new();

    bootstrap.run(&api, &mut store).await;
    bootstrap.run(&api, &mut store).await;

    assert_eq!(api.fetch_lists_calls.load(Ordering::SeqCst), 1);
    assert_eq!(bootstrap.phase(), Phase::ListsPending);
    assert!(store.lists().is_empty());
}

// =============================================================================
// LOGIN SYNC
// =============================================================================

#[tokio::test]
async fn login_sync_replaces_credentials_once() {
    let api = MockApi::new();
    let mut store = fresh_store();
    store.set_credentials(MockApi::guest_credentials());

    let mut sync = LoginSync::new();
    sync.on_login(Some("jo@example.com"), &api, &mut store).await;
    sync.on_login(Some("jo@example.com"), &api, &mut store).await;

    assert_eq!(api.sync_calls.load(Ordering::SeqCst), 1, "one exchange per login");
    assert_eq!(store.credentials().unwrap().regid, "customer-regid");
    assert!(sync.processed());
}

#[tokio::test]
async fn login_sync_ignores_guests() {
    let api = MockApi::new();
    let mut store = fresh_store();
    store.set_credentials(MockApi::guest_credentials());

    let mut sync = LoginSync::new();
    sync.on_login(None, &api, &mut store).await;
    sync.on_login(Some(""), &api, &mut store).await;

    assert_eq!(api.sync_calls.load(Ordering::SeqCst), 0);
    assert!(!sync.processed());
    assert_eq!(store.credentials().unwrap().regid, "guest-regid");
}

#[tokio::test]
async fn login_sync_waits_for_initialization() {
    let api = MockApi::new();
    let mut store = fresh_store();

    let mut sync = LoginSync::new();
    sync.on_login(Some("jo@example.com"), &api, &mut store).await;

    assert_eq!(api.sync_calls.load(Ordering::SeqCst), 0);
    assert!(!sync.processed(), "guard must stay unset so a later signal can sync");
}

#[tokio::test]
async fn login_sync_failure_keeps_guest_credentials() {
    let mut api = MockApi::new();
    api.fail_sync = true;
    let mut store = fresh_store();
    store.set_credentials(MockApi::guest_credentials());

    let mut sync = LoginSync::new();
    sync.on_login(Some("jo@example.com"), &api, &mut store).await;

    assert_eq!(store.credentials().unwrap().regid, "guest-regid");
    assert!(sync.processed(), "failed exchange still consumes the one-shot guard");
}
