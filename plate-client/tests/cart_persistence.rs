//! Cart persistence across sessions

use plate_client::{
    CartLine, CartStore, ClientConfig, FileCartStorage, MemoryBackend, OrderingSession,
};
use rust_decimal_macros::dec;
use shared::MenuItem;
use std::sync::Arc;

fn backend() -> Arc<MemoryBackend> {
    let backend = MemoryBackend::new();
    backend.add_tenant("t-acme", "acme");
    backend.add_table("t-acme", 3, 3);
    backend.add_menu_item(MenuItem {
        id: 1,
        tenant_id: "t-acme".into(),
        name: "Soup".into(),
        description: Some("Tomato".into()),
        price: dec!(4.50),
        category: "Appetizer".into(),
        is_active: true,
    });
    Arc::new(backend)
}

#[tokio::test]
async fn cart_survives_reopening_session() {
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig::default().with_storage_dir(dir.path());

    {
        let mut session = OrderingSession::open(backend(), config.clone(), "acme.example.com", 3)
            .await
            .unwrap();
        session.add_item(1);
        session.add_item(1);
    }

    let session = OrderingSession::open(backend(), config, "acme.example.com", 3)
        .await
        .unwrap();
    assert_eq!(session.cart().quantity_of(1), 2);
    assert_eq!(session.cart().total(), dec!(9.00));
}

#[tokio::test]
async fn placed_order_leaves_empty_slot() {
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig::default().with_storage_dir(dir.path());
    let mut session = OrderingSession::open(backend(), config.clone(), "acme.example.com", 3)
        .await
        .unwrap();
    session.add_item(1);
    session.place_order().await.unwrap();

    let reopened = OrderingSession::open(backend(), config, "acme.example.com", 3)
        .await
        .unwrap();
    assert!(reopened.cart().is_empty());
}

#[test]
fn corrupt_file_starts_empty_and_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileCartStorage::new(dir.path(), "quickplate-cart");
    storage.ensure_dir().unwrap();
    std::fs::write(storage.path(), "{ not a cart").unwrap();

    let mut cart = CartStore::open(storage.clone());
    assert!(cart.is_empty());

    cart.add(&MenuItem {
        id: 2,
        tenant_id: "t-acme".into(),
        name: "Tea".into(),
        description: None,
        price: dec!(2.00),
        category: "Drink".into(),
        is_active: true,
    });
    let saved: Vec<CartLine> =
        serde_json::from_str(&std::fs::read_to_string(storage.path()).unwrap()).unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].item_id, 2);
}

#[test]
fn stored_lines_with_extra_fields_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileCartStorage::new(dir.path(), "quickplate-cart");
    storage.ensure_dir().unwrap();
    std::fs::write(
        storage.path(),
        r#"[{"id":1,"name":"Soup","price":4.5,"quantity":3,"tenant_id":"t-acme","is_active":true}]"#,
    )
    .unwrap();

    let cart = CartStore::open(storage);
    assert_eq!(cart.quantity_of(1), 3);
    assert_eq!(cart.total(), dec!(13.5));
}
