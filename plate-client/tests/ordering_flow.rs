//! End-to-end ordering flow against the in-memory backend

use plate_client::{
    CartStore, CatalogFetcher, ClientConfig, ClientError, MemoryBackend, MemoryCartStorage,
    OrderStatus, OrderSubmitter, OrderingSession, StatusTracker, TenantResolver, TrackerConfig,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shared::MenuItem;
use std::sync::Arc;
use std::time::Duration;

fn menu_item(id: i64, tenant_id: &str, name: &str, price: Decimal, category: &str) -> MenuItem {
    MenuItem {
        id,
        tenant_id: tenant_id.into(),
        name: name.into(),
        description: None,
        price,
        category: category.into(),
        is_active: true,
    }
}

fn acme() -> Arc<MemoryBackend> {
    let backend = MemoryBackend::new();
    backend.add_tenant("t-acme", "acme");
    backend.add_table("t-acme", 3, 3);
    backend.add_menu_item(menu_item(1, "t-acme", "Soup", dec!(4.50), "Appetizer"));
    backend.add_menu_item(menu_item(2, "t-acme", "Lemonade", dec!(2.00), "Drink"));
    backend.add_menu_item(menu_item(5, "t-acme", "Brownie", dec!(3.00), "Dessert"));
    Arc::new(backend)
}

fn fast_config() -> ClientConfig {
    ClientConfig::default().with_poll_interval(Duration::from_millis(10))
}

#[test]
fn cart_total_of_mixed_lines() {
    let backend = acme();
    let mut cart = CartStore::in_memory();
    let soup = menu_item(1, "t-acme", "Soup", dec!(4.50), "Appetizer");
    let lemonade = menu_item(2, "t-acme", "Lemonade", dec!(2.00), "Drink");

    cart.add(&soup);
    cart.add(&soup);
    cart.add(&lemonade);

    assert_eq!(cart.total(), dec!(11.00));
    assert_eq!(backend.insert_calls(), 0);
}

#[test]
fn adding_same_item_twice_merges_line() {
    let mut cart = CartStore::in_memory();
    let brownie = menu_item(5, "t-acme", "Brownie", dec!(3.00), "Dessert");

    cart.add(&brownie);
    cart.add(&brownie);

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].item_id, 5);
    assert_eq!(cart.lines()[0].quantity, 2);
}

#[tokio::test]
async fn resolver_matches_subdomain() {
    let resolver = TenantResolver::new(acme());

    let ctx = resolver.resolve("acme.example.com").await.unwrap();
    assert_eq!(ctx.tenant_id(), "t-acme");

    let err = resolver.resolve("ghost.example.com").await.unwrap_err();
    assert!(matches!(err, ClientError::TenantNotFound(_)));
}

#[tokio::test]
async fn submit_clears_cart_and_order_reads_received() {
    let backend = acme();
    let ctx = TenantResolver::new(backend.clone())
        .resolve("acme.example.com")
        .await
        .unwrap();
    let catalog = CatalogFetcher::new(backend.clone())
        .load_catalog(&ctx, 3)
        .await
        .unwrap();

    let mut cart = CartStore::in_memory();
    cart.add(catalog.item(1).unwrap());
    cart.add(catalog.item(1).unwrap());
    cart.add(catalog.item(2).unwrap());

    let order = OrderSubmitter::new(backend.clone())
        .submit(&mut cart, &ctx, catalog.table().unwrap().id)
        .await
        .unwrap();
    assert!(cart.is_empty());
    assert_eq!(order.total, dec!(11.00));

    let tracker = StatusTracker::new(backend.clone(), ctx, &order);
    assert_eq!(
        tracker.current_status().await.unwrap(),
        Some(OrderStatus::Received)
    );
}

#[tokio::test]
async fn two_forward_moves_notify_exactly_twice() {
    let backend = acme();
    let mut session = OrderingSession::open(backend.clone(), fast_config(), "acme.example.com", 3)
        .await
        .unwrap();
    assert!(session.add_item(1));
    let order_id = session.place_order().await.unwrap().id;
    let tracker = session.tracker_mut().unwrap();

    backend.set_status(order_id, OrderStatus::Preparing);
    let first = tracker.recv().await.unwrap();
    backend.set_status(order_id, OrderStatus::Ready);
    let second = tracker.recv().await.unwrap();

    assert_eq!(first.previous, Some(OrderStatus::Received));
    assert_eq!(first.current, OrderStatus::Preparing);
    assert_eq!(second.previous, Some(OrderStatus::Preparing));
    assert_eq!(second.current, OrderStatus::Ready);
    assert!(tracker.recv().await.is_none());
}

#[tokio::test]
async fn failed_submission_keeps_cart_for_retry() {
    let backend = acme();
    let mut session = OrderingSession::open(backend.clone(), fast_config(), "acme.example.com", 3)
        .await
        .unwrap();
    session.add_item(5);
    session.add_item(5);

    backend.fail_next_inserts(1);
    let err = session.place_order().await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(session.cart().quantity_of(5), 2);
    assert!(session.last_order().is_none());

    let order = session.place_order().await.unwrap();
    assert_eq!(order.total, dec!(6.00));
    assert_eq!(backend.orders().len(), 1);
    assert!(session.cart().is_empty());
}

#[tokio::test]
async fn new_order_replaces_previous_tracker() {
    let backend = acme();
    let mut session = OrderingSession::open(backend.clone(), fast_config(), "acme.example.com", 3)
        .await
        .unwrap();

    session.add_item(1);
    let first_id = session.place_order().await.unwrap().id;
    session.add_item(2);
    let second_id = session.place_order().await.unwrap().id;

    assert_ne!(first_id, second_id);
    let tracker = session.tracker_mut().unwrap();
    assert_eq!(tracker.order_id(), second_id);

    backend.set_status(first_id, OrderStatus::Ready);
    backend.set_status(second_id, OrderStatus::Preparing);
    let change = tracker.recv().await.unwrap();
    assert_eq!(change.order_id, second_id);
}

#[tokio::test]
async fn submission_uses_snapshot_prices() {
    let backend = acme();
    let ctx = TenantResolver::new(backend.clone())
        .resolve("acme.example.com")
        .await
        .unwrap();
    let mut cart = CartStore::open(MemoryCartStorage::new());
    cart.add(&menu_item(1, "t-acme", "Soup", dec!(4.50), "Appetizer"));

    let order = OrderSubmitter::new(backend.clone())
        .submit(&mut cart, &ctx, 3)
        .await
        .unwrap();
    backend.add_menu_item(menu_item(1, "t-acme", "Soup", dec!(9.99), "Appetizer"));

    let stored = backend.orders().pop().unwrap();
    assert_eq!(stored.items[0].price, dec!(4.50));
    assert_eq!(stored.id, order.id);
}

#[tokio::test]
async fn dropping_tracker_leaves_order_untouched() {
    let backend = acme();
    let ctx = TenantResolver::new(backend.clone())
        .resolve("acme.example.com")
        .await
        .unwrap();
    let mut cart = CartStore::in_memory();
    cart.add(&menu_item(2, "t-acme", "Lemonade", dec!(2.00), "Drink"));
    let order = OrderSubmitter::new(backend.clone())
        .submit(&mut cart, &ctx, 3)
        .await
        .unwrap();

    let handle = StatusTracker::new(backend.clone(), ctx, &order).spawn(TrackerConfig {
        poll_interval: Duration::from_millis(10),
        buffer: 1,
    });
    let order_id = handle.order_id();
    drop(handle);

    // The order itself is unaffected by the tracker going away
    assert!(backend.set_status(order_id, OrderStatus::Preparing));
}
