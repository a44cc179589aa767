use std::sync::Arc;
use std::sync::atomic::Ordering;

use super::*;
use crate::api::test_helpers::MockApi;
use crate::provider::types::{List, ListItem};
use crate::storage::MemoryStore;

fn ready_store(api_lists: &[List]) -> WishlistStore {
    let mut store = WishlistStore::open(Arc::new(MemoryStore::new()));
    store.set_credentials(MockApi::guest_credentials());
    store.set_lists(api_lists.to_vec());
    if let Some(first) = api_lists.first() {
        store.set_selected_list_id(first.id.clone());
    }
    store
}

fn item(product_id: u64, variant_id: u64) -> ListItem {
    ListItem {
        variant_id,
        product_id,
        product_url: format!("https://shop.test/products/{product_id}"),
        image_url: None,
        title: None,
        price: None,
    }
}

fn empty_list(id: &str) -> List {
    List { id: id.to_owned(), name: "My Wishlist".to_owned(), contents: Vec::new(), count: Some(0) }
}

// =============================================================================
// MEMBERSHIP
// =============================================================================

#[test]
fn membership_enabled_for_pair_in_any_list() {
    let lists = vec![
        empty_list("a"),
        List { id: "b".into(), name: "Gifts".into(), contents: vec![item(7, 70)], count: Some(1) },
    ];
    let store = ready_store(&lists);

    let toggle = WishlistToggle::new(7, 70, "https://shop.test/products/7");
    assert!(toggle.is_wishlisted(&store));

    let absent = WishlistToggle::new(7, 71, "https://shop.test/products/7");
    assert!(!absent.is_wishlisted(&store));
}

#[test]
fn toggle_from_gids_matches_numeric_membership() {
    let lists = vec![List {
        id: "a".into(),
        name: "My Wishlist".into(),
        contents: vec![item(8_519_377_060_067, 445_566)],
        count: Some(1),
    }];
    let store = ready_store(&lists);

    let toggle = WishlistToggle::from_gids(
        "gid://shopify/Product/8519377060067",
        "gid://shopify/ProductVariant/445566",
        "https://shop.test/products/thing",
    )
    .unwrap();
    assert!(toggle.is_wishlisted(&store));

    assert!(WishlistToggle::from_gids("gid://shopify/Product/", "445566", "u").is_none());
}

// =============================================================================
// TOGGLE
// =============================================================================

#[tokio::test]
async fn toggle_refuses_before_initialization() {
    let api = MockApi::new();
    let mut store = WishlistStore::open(Arc::new(MemoryStore::new()));
    let mut toggle = WishlistToggle::new(1, 2, "https://shop.test/products/1");

    let outcome = toggle.toggle(&api, &mut store).await;

    assert_eq!(outcome, ToggleOutcome::NotReady);
    assert_eq!(api.update_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn toggle_refuses_without_selected_list() {
    let api = MockApi::new();
    let mut store = WishlistStore::open(Arc::new(MemoryStore::new()));
    store.set_credentials(MockApi::guest_credentials());

    let mut toggle = WishlistToggle::new(1, 2, "https://shop.test/products/1");
    assert_eq!(toggle.toggle(&api, &mut store).await, ToggleOutcome::NotReady);
}

#[tokio::test]
async fn toggle_drops_click_while_loading() {
    let api = MockApi::new();
    let mut store = ready_store(&[empty_list("lid-1")]);

    let mut toggle = WishlistToggle::new(1, 2, "https://shop.test/products/1");
    toggle.loading = true;

    assert_eq!(toggle.toggle(&api, &mut store).await, ToggleOutcome::InFlight);
    assert_eq!(api.update_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn toggle_adds_then_resyncs_from_refetch() {
    let api = MockApi::with_lists(vec![empty_list("list-1")]);
    let mut store = ready_store(&[empty_list("list-1")]);
    let mut toggle = WishlistToggle::new(42, 7, "https://shop.test/products/42");

    let outcome = toggle.toggle(&api, &mut store).await;

    assert_eq!(outcome, ToggleOutcome::Applied { wishlisted: true });
    assert!(toggle.is_wishlisted(&store), "membership derived from the re-fetched collection");
    assert_eq!(api.update_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.fetch_lists_calls.load(Ordering::SeqCst), 1);
    assert!(!toggle.is_loading());
}

#[tokio::test]
async fn add_then_remove_restores_original_membership() {
    let api = MockApi::with_lists(vec![empty_list("list-1")]);
    let mut store = ready_store(&[empty_list("list-1")]);
    let mut toggle = WishlistToggle::new(42, 7, "https://shop.test/products/42");

    assert!(!toggle.is_wishlisted(&store));

    let added = toggle.toggle(&api, &mut store).await;
    assert_eq!(added, ToggleOutcome::Applied { wishlisted: true });
    assert!(toggle.is_wishlisted(&store));

    let removed = toggle.toggle(&api, &mut store).await;
    assert_eq!(removed, ToggleOutcome::Applied { wishlisted: false });
    assert!(!toggle.is_wishlisted(&store), "back to the original state");
}

#[tokio::test]
async fn failed_update_leaves_membership_unchanged() {
    let mut api = MockApi::with_lists(vec![empty_list("list-1")]);
    api.fail_update = true;
    let mut store = ready_store(&[empty_list("list-1")]);
    let mut toggle = WishlistToggle::new(42, 7, "https://shop.test/products/42");

    let outcome = toggle.toggle(&api, &mut store).await;

    assert_eq!(outcome, ToggleOutcome::Failed);
    assert!(!toggle.is_wishlisted(&store));
    assert_eq!(api.fetch_lists_calls.load(Ordering::SeqCst), 0, "no resync after a failed update");
    assert!(!toggle.is_loading());
}

// =============================================================================
// LIST VIEW
// =============================================================================

struct MockCatalog;

#[async_trait::async_trait]
impl CatalogLookup for MockCatalog {
    async fn products_by_ids(&self, ids: &[u64]) -> Vec<Product> {
        ids.iter()
            .map(|id| Product {
                id: *id,
                title: format!("Product {id}"),
                handle: None,
                image_url: None,
                price: None,
            })
            .collect()
    }
}

#[tokio::test]
async fn list_view_resolves_contents_to_products() {
    let list = List {
        id: "list-1".into(),
        name: "My Wishlist".into(),
        contents: vec![item(5, 50), item(6, 60)],
        count: Some(2),
    };
    let api = MockApi::with_lists(vec![list.clone()]);
    let store = ready_store(&[list]);

    let products = load_wishlist_products(&api, &MockCatalog, &store).await;

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, 5);
    assert_eq!(products[1].title, "Product 6");
}

#[tokio::test]
async fn list_view_filters_invalid_product_refs() {
    let list = List {
        id: "list-1".into(),
        name: "My Wishlist".into(),
        contents: vec![item(0, 10), item(9, 90)],
        count: Some(2),
    };
    let api = MockApi::with_lists(vec![list.clone()]);
    let store = ready_store(&[list]);

    let products = load_wishlist_products(&api, &MockCatalog, &store).await;

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, 9);
}

#[tokio::test]
async fn list_view_is_empty_without_selection() {
    let api = MockApi::new();
    let mut store = WishlistStore::open(Arc::new(MemoryStore::new()));
    store.set_credentials(MockApi::guest_credentials());

    let products = load_wishlist_products(&api, &MockCatalog, &store).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn list_view_is_empty_when_fetch_fails() {
    // Selected list unknown to the gateway: fetch returns 404.
    let api = MockApi::new();
    let store = ready_store(&[empty_list("ghost")]);

    let products = load_wishlist_products(&api, &MockCatalog, &store).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn list_view_is_empty_for_empty_list() {
    let api = MockApi::with_lists(vec![empty_list("list-1")]);
    let store = ready_store(&[empty_list("list-1")]);

    let products = load_wishlist_products(&api, &MockCatalog, &store).await;
    assert!(products.is_empty());
}
