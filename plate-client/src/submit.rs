//! Turning the cart into a placed order

use crate::backend::SharedBackend;
use crate::cart::CartStore;
use crate::tenant::TenantContext;
use crate::{ClientError, ClientResult};
use shared::{NewOrder, Order};

/// Submits the cart as one order row
pub struct OrderSubmitter {
    backend: SharedBackend,
}

impl OrderSubmitter {
    pub fn new(backend: SharedBackend) -> Self {
        Self { backend }
    }

    /// Submit the cart for `table_id`
    ///
    /// An empty cart is rejected before any backend call. The cart is
    /// cleared only after the backend confirms the insert; on failure it is
    /// left exactly as it was so the diner can retry.
    ///
    /// A confirmation for another tenant or table yields
    /// [`ClientError::InvalidResponse`]. The backend has already stored that
    /// order, so this outcome is not retry-safe: resubmitting the kept cart
    /// places a second order.
    pub async fn submit(
        &self,
        cart: &mut CartStore,
        ctx: &TenantContext,
        table_id: i64,
    ) -> ClientResult<Order> {
        if cart.is_empty() {
            return Err(ClientError::EmptyCart);
        }

        let new_order = NewOrder::new(ctx.tenant_id(), table_id, cart.snapshot());
        tracing::debug!(
            tenant_id = %ctx.tenant_id(),
            table_id,
            lines = new_order.items.len(),
            total = %new_order.total,
            "Submitting order"
        );

        let order = match self.backend.insert_order(&new_order).await {
            Ok(order) => order,
            Err(e) => {
                tracing::warn!(tenant_id = %ctx.tenant_id(), table_id, error = %e, "Order submission failed");
                return Err(e);
            }
        };

        if !ctx.owns(&order.tenant_id) || order.table_id != table_id {
            tracing::error!(
                order_id = order.id,
                tenant_id = %order.tenant_id,
                table_id = order.table_id,
                expected_tenant = %ctx.tenant_id(),
                expected_table = table_id,
                "Backend stored an order for a different tenant or table; resubmitting would duplicate it"
            );
            return Err(ClientError::InvalidResponse(format!(
                "order {} does not belong to this table",
                order.id
            )));
        }

        cart.clear();
        tracing::info!(
            order_id = order.id,
            tenant_id = %ctx.tenant_id(),
            table_id,
            total = %order.total,
            "Order placed"
        );
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MemoryBackend, OrderingBackend};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use shared::{DiningTable, MenuItem, OrderStatus, Tenant};
    use std::sync::Arc;

    /// Stores orders in the wrapped backend but confirms them for another table
    struct MisroutingBackend(Arc<MemoryBackend>);

    #[async_trait]
    impl OrderingBackend for MisroutingBackend {
        async fn find_tenants(&self, subdomain: &str) -> ClientResult<Vec<Tenant>> {
            self.0.find_tenants(subdomain).await
        }

        async fn active_menu_items(&self, tenant_id: &str) -> ClientResult<Vec<MenuItem>> {
            self.0.active_menu_items(tenant_id).await
        }

        async fn find_table(
            &self,
            tenant_id: &str,
            table_id: i64,
        ) -> ClientResult<Option<DiningTable>> {
            self.0.find_table(tenant_id, table_id).await
        }

        async fn insert_order(&self, order: &NewOrder) -> ClientResult<Order> {
            let mut stored = self.0.insert_order(order).await?;
            stored.table_id += 1;
            Ok(stored)
        }

        async fn find_order(&self, tenant_id: &str, order_id: i64) -> ClientResult<Option<Order>> {
            self.0.find_order(tenant_id, order_id).await
        }
    }

    fn ctx() -> TenantContext {
        TenantContext::new(Tenant {
            id: "t-a".into(),
            subdomain: "acme".into(),
            name: None,
        })
    }

    fn soup() -> MenuItem {
        MenuItem {
            id: 1,
            tenant_id: "t-a".into(),
            name: "Soup".into(),
            description: None,
            price: dec!(4.50),
            category: "Appetizer".into(),
            is_active: true,
        }
    }

    fn backend() -> Arc<MemoryBackend> {
        let backend = MemoryBackend::new();
        backend.add_tenant("t-a", "acme");
        backend.add_table("t-a", 3, 3);
        Arc::new(backend)
    }

    #[tokio::test]
    async fn test_empty_cart_makes_no_call() {
        let backend = backend();
        let submitter = OrderSubmitter::new(backend.clone());
        let mut cart = CartStore::in_memory();

        let err = submitter.submit(&mut cart, &ctx(), 3).await.unwrap_err();
        assert!(matches!(err, ClientError::EmptyCart));
        assert_eq!(backend.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_success_clears_cart() {
        let backend = backend();
        let submitter = OrderSubmitter::new(backend.clone());
        let mut cart = CartStore::in_memory();
        cart.add(&soup());
        cart.add(&soup());

        let order = submitter.submit(&mut cart, &ctx(), 3).await.unwrap();
        assert_eq!(order.status, OrderStatus::Received);
        assert_eq!(order.total, dec!(9.00));
        assert_eq!(order.items[0].quantity, 2);
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_cart() {
        let backend = backend();
        backend.fail_next_inserts(1);
        let submitter = OrderSubmitter::new(backend.clone());
        let mut cart = CartStore::in_memory();
        cart.add(&soup());

        let err = submitter.submit(&mut cart, &ctx(), 3).await.unwrap_err();
        assert!(err.is_backend());
        assert_eq!(cart.quantity_of(1), 1);
        assert!(backend.orders().is_empty());
    }

    #[tokio::test]
    async fn test_mismatched_confirmation_keeps_cart_and_is_not_retryable() {
        let inner = backend();
        let submitter = OrderSubmitter::new(Arc::new(MisroutingBackend(inner.clone())));
        let mut cart = CartStore::in_memory();
        cart.add(&soup());

        let err = submitter.submit(&mut cart, &ctx(), 3).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
        assert!(!err.is_retryable());
        assert_eq!(cart.quantity_of(1), 1);
        // the order was stored before the mismatch was noticed
        assert_eq!(inner.orders().len(), 1);
    }
}
