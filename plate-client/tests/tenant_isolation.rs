//! Cross-tenant isolation checks

use plate_client::{
    CatalogFetcher, ClientConfig, ClientError, MemoryBackend, OrderingSession, StatusTracker,
    TenantResolver,
};
use rust_decimal_macros::dec;
use shared::MenuItem;
use std::sync::Arc;

fn two_tenants() -> Arc<MemoryBackend> {
    let backend = MemoryBackend::new();
    backend.add_tenant("t-acme", "acme");
    backend.add_tenant("t-bistro", "bistro");
    backend.add_table("t-acme", 1, 1);
    backend.add_table("t-bistro", 2, 1);
    for (id, tenant_id, name) in [(10, "t-acme", "Burger"), (20, "t-bistro", "Crepe")] {
        backend.add_menu_item(MenuItem {
            id,
            tenant_id: tenant_id.into(),
            name: name.into(),
            description: None,
            price: dec!(8.00),
            category: "Main".into(),
            is_active: true,
        });
    }
    Arc::new(backend)
}

#[tokio::test]
async fn menu_only_lists_own_items() {
    let backend = two_tenants();
    let ctx = TenantResolver::new(backend.clone())
        .resolve("bistro.example.com")
        .await
        .unwrap();
    let menu = CatalogFetcher::new(backend).load_menu(&ctx).await.unwrap();

    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].name, "Crepe");
}

#[tokio::test]
async fn other_tenants_table_reads_as_missing() {
    let backend = two_tenants();
    let session = OrderingSession::open(backend, ClientConfig::default(), "acme.example.com", 2)
        .await
        .unwrap();

    assert!(matches!(session.table(), Err(ClientError::TableNotFound(2))));
}

#[tokio::test]
async fn other_tenants_order_is_invisible() {
    let backend = two_tenants();
    let mut session =
        OrderingSession::open(backend.clone(), ClientConfig::default(), "acme.example.com", 1)
            .await
            .unwrap();
    session.add_item(10);
    let order = session.place_order().await.unwrap().clone();

    let bistro = TenantResolver::new(backend.clone())
        .resolve("bistro.example.com")
        .await
        .unwrap();
    let tracker = StatusTracker::with_baseline(backend, bistro, order.id, None);
    assert_eq!(tracker.current_status().await.unwrap(), None);
}

#[tokio::test]
async fn unknown_subdomain_ends_session() {
    let err = OrderingSession::open(
        two_tenants(),
        ClientConfig::default(),
        "ghost.example.com",
        1,
    )
    .await
    .unwrap_err();
    assert!(err.is_fatal());
}
