//! End-to-end cart scenarios against the in-memory backend

use freshcart_cart::{messages, CartError, CartService, NoticeSink};
use freshcart_domain::{Product, ProductId, UserId};
use freshcart_store::{AuthSession, CartStore, IdentityProvider};
use freshcart_test_utils::{init_test_logging, product_fixture, InMemoryBackend, RecordingNotices};
use rust_decimal::Decimal;
use std::sync::Arc;

struct Harness {
    backend: Arc<InMemoryBackend>,
    notices: Arc<RecordingNotices>,
    service: Arc<CartService>,
}

fn harness(session: AuthSession) -> Harness {
    init_test_logging();
    let backend = Arc::new(InMemoryBackend::new());
    let notices = Arc::new(RecordingNotices::new());
    let service = Arc::new(CartService::new(
        Arc::new(session) as Arc<dyn IdentityProvider>,
        Arc::clone(&backend) as Arc<dyn CartStore>,
        Arc::clone(&notices) as Arc<dyn NoticeSink>,
    ));
    Harness {
        backend,
        notices,
        service,
    }
}

fn signed_in() -> Harness {
    harness(AuthSession::signed_in(UserId::new()))
}

async fn seed(harness: &Harness, product: &Product, quantity: u32) {
    harness.backend.stock_product(product.clone());
    harness.service.add_to_cart(product, quantity).await.unwrap();
    harness.notices.clear();
}

#[tokio::test]
async fn signed_out_add_is_rejected_without_remote_calls() {
    let h = harness(AuthSession::new());
    let bananas = product_fixture("Bananas", "40.00", 10);

    let result = h.service.add_to_cart(&bananas, 1).await;

    assert!(matches!(result, Err(CartError::NotAuthenticated)));
    assert_eq!(h.backend.remote_calls(), 0);
    assert_eq!(h.notices.messages(), vec![messages::SIGN_IN_REQUIRED]);
    assert!(h.service.items().is_empty());
}

#[tokio::test]
async fn fresh_add_beyond_stock_creates_no_row() {
    let h = signed_in();
    let limes = product_fixture("Limes", "15.00", 3);
    h.backend.stock_product(limes.clone());

    let result = h.service.add_to_cart(&limes, 5).await;

    assert!(matches!(result, Err(CartError::InsufficientStock { .. })));
    assert_eq!(h.backend.remote_calls(), 0);
    assert_eq!(h.notices.messages(), vec![messages::NOT_ENOUGH_STOCK]);
    assert!(h.service.items().is_empty());
}

#[tokio::test]
async fn sequential_adds_of_one_product_merge() {
    let h = signed_in();
    let apples = product_fixture("Apples", "120.00", 5);
    h.backend.stock_product(apples.clone());

    h.service.add_to_cart(&apples, 2).await.unwrap();
    h.service.add_to_cart(&apples, 2).await.unwrap();

    let items = h.service.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 4);
    assert_eq!(h.service.item_count(), 4);

    // one row remotely too, not two
    let cart_id = h.service.cart_id().unwrap();
    assert_eq!(h.backend.item_rows(cart_id).len(), 1);
    assert_eq!(
        h.notices.messages(),
        vec![messages::ADDED_TO_CART, messages::ADDED_TO_CART]
    );
}

#[tokio::test]
async fn merge_past_the_stock_ceiling_is_rejected() {
    let h = signed_in();
    let ghee = product_fixture("Ghee", "450.00", 5);
    seed(&h, &ghee, 4).await;

    let result = h.service.add_to_cart(&ghee, 2).await;

    assert!(matches!(
        result,
        Err(CartError::InsufficientStock { merged: true, .. })
    ));
    assert_eq!(h.notices.messages(), vec![messages::CANNOT_ADD_MORE]);
    assert_eq!(h.service.item_count(), 4);
}

#[tokio::test]
async fn updating_quantity_to_zero_removes_the_item() {
    let h = signed_in();
    let curd = product_fixture("Curd", "30.00", 10);
    seed(&h, &curd, 1).await;
    assert_eq!(h.service.item_count(), 1);

    let item_id = h.service.items()[0].id;
    h.service.update_quantity(item_id, 0).await.unwrap();

    assert_eq!(h.service.item_count(), 0);
    assert_eq!(h.notices.messages(), vec![messages::ITEM_REMOVED]);
}

#[tokio::test]
async fn updating_quantity_rewrites_the_row() {
    let h = signed_in();
    let rice = product_fixture("Rice", "90.00", 20);
    seed(&h, &rice, 1).await;

    let item_id = h.service.items()[0].id;
    h.service.update_quantity(item_id, 7).await.unwrap();

    assert_eq!(h.service.item_count(), 7);
    // quantity updates emit no success notice
    assert!(h.notices.messages().is_empty());
}

#[tokio::test]
async fn subtotal_sums_price_times_quantity() {
    let h = signed_in();
    let paneer = product_fixture("Paneer", "100.00", 10);
    let honey = product_fixture("Honey", "250.00", 10);
    seed(&h, &paneer, 2).await;
    seed(&h, &honey, 1).await;

    assert_eq!(h.service.subtotal(), Decimal::new(45000, 2));
    assert_eq!(h.service.item_count(), 3);
}

#[tokio::test]
async fn unresolved_product_contributes_zero_to_subtotal() {
    let h = signed_in();
    let tea = product_fixture("Tea", "180.00", 10);
    seed(&h, &tea, 1).await;

    // a row whose product the catalog no longer resolves
    let cart_id = h.service.cart_id().unwrap();
    h.backend
        .insert_item(cart_id, ProductId::new(), 2)
        .await
        .unwrap();
    h.service.refresh().await;

    assert_eq!(h.service.item_count(), 3);
    assert_eq!(h.service.subtotal(), Decimal::new(18000, 2));
}

#[tokio::test]
async fn removing_an_unknown_item_leaves_other_entries_intact() {
    let h = signed_in();
    let salt = product_fixture("Salt", "20.00", 10);
    seed(&h, &salt, 2).await;

    h.service
        .remove_from_cart(freshcart_domain::CartItemId::new())
        .await
        .unwrap();

    assert_eq!(h.service.item_count(), 2);
}

#[tokio::test]
async fn clearing_the_cart_empties_local_state_directly() {
    let h = signed_in();
    let oats = product_fixture("Oats", "99.00", 10);
    let jam = product_fixture("Jam", "150.00", 10);
    seed(&h, &oats, 1).await;
    seed(&h, &jam, 1).await;

    let cart_id = h.service.cart_id().unwrap();
    let calls_before_clear = h.backend.remote_calls();
    h.service.clear_cart().await.unwrap();

    assert!(h.service.items().is_empty());
    assert!(h.backend.item_rows(cart_id).is_empty());
    // the cart container survives; only its items are gone
    assert_eq!(h.service.cart_id(), Some(cart_id));
    // one delete, no trailing reconciliation fetch
    assert_eq!(h.backend.remote_calls(), calls_before_clear + 1);
    assert!(h.notices.messages().is_empty());
}

#[tokio::test]
async fn clear_failure_leaves_local_items_unchanged() {
    let h = signed_in();
    let flour = product_fixture("Flour", "60.00", 10);
    seed(&h, &flour, 3).await;

    h.backend.set_offline(true);
    let result = h.service.clear_cart().await;
    h.backend.set_offline(false);

    assert!(matches!(result, Err(CartError::RemoteOperationFailed(_))));
    assert_eq!(h.service.item_count(), 3);
    assert_eq!(h.notices.messages(), vec![messages::CLEAR_FAILED]);
}

#[tokio::test]
async fn remote_add_failure_keeps_state_and_surfaces_generic_notice() {
    let h = signed_in();
    let milk = product_fixture("Milk", "55.00", 10);
    seed(&h, &milk, 1).await;

    h.backend.set_offline(true);
    let eggs = product_fixture("Eggs", "80.00", 12);
    let result = h.service.add_to_cart(&eggs, 1).await;
    h.backend.set_offline(false);

    assert!(matches!(result, Err(CartError::RemoteOperationFailed(_))));
    assert_eq!(h.notices.messages(), vec![messages::ADD_FAILED]);
    assert_eq!(h.service.item_count(), 1);
}

#[tokio::test]
async fn failed_refresh_is_absorbed_and_keeps_previous_state() {
    let h = signed_in();
    let dates = product_fixture("Dates", "320.00", 10);
    seed(&h, &dates, 2).await;

    h.backend.set_offline(true);
    h.service.refresh().await;
    h.backend.set_offline(false);

    // stale-but-valid state, no user-visible notice
    assert_eq!(h.service.item_count(), 2);
    assert!(h.notices.messages().is_empty());
    assert!(!h.service.is_loading());
}

#[tokio::test]
async fn refresh_while_signed_out_clears_without_remote_calls() {
    let h = harness(AuthSession::new());

    h.service.refresh().await;

    assert!(h.service.items().is_empty());
    assert!(h.service.cart_id().is_none());
    assert_eq!(h.backend.remote_calls(), 0);
}

#[tokio::test]
async fn first_mutation_creates_the_cart_lazily() {
    let h = signed_in();
    let basil = product_fixture("Basil", "25.00", 10);
    h.backend.stock_product(basil.clone());

    assert!(h.service.cart_id().is_none());
    h.service.add_to_cart(&basil, 1).await.unwrap();

    assert!(h.service.cart_id().is_some());
    assert_eq!(h.service.item_count(), 1);
}
