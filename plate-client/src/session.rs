//! One diner's ordering session
//!
//! Ties the components together the way the ordering screen uses them:
//! resolve the tenant, load the catalog, edit the cart, place an order and
//! watch it. At most one order is tracked at a time; placing another one
//! replaces the previous tracker.

use crate::backend::SharedBackend;
use crate::cart::{CartStore, FileCartStorage, MemoryCartStorage};
use crate::catalog::{Catalog, CatalogFetcher};
use crate::submit::OrderSubmitter;
use crate::tenant::{TenantContext, TenantResolver};
use crate::tracker::{StatusTracker, TrackerHandle};
use crate::{ClientConfig, ClientResult};
use shared::{CategoryFilter, DiningTable, MenuItem, Order};

/// Ordering session bound to one tenant and one table
pub struct OrderingSession {
    backend: SharedBackend,
    config: ClientConfig,
    context: TenantContext,
    catalog: Catalog,
    cart: CartStore,
    filter: CategoryFilter,
    last_order: Option<Order>,
    tracker: Option<TrackerHandle>,
}

impl std::fmt::Debug for OrderingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderingSession")
            .field("config", &self.config)
            .field("context", &self.context)
            .field("catalog", &self.catalog)
            .field("filter", &self.filter)
            .field("last_order", &self.last_order)
            .finish_non_exhaustive()
    }
}

impl OrderingSession {
    /// Open a session for `host` and the table from the access link
    ///
    /// Tenant errors are fatal and returned. A missing table is not: the
    /// session opens and [`OrderingSession::table`] reports it.
    pub async fn open(
        backend: SharedBackend,
        config: ClientConfig,
        host: &str,
        table_id: i64,
    ) -> ClientResult<Self> {
        config.validate()?;
        let context = TenantResolver::new(backend.clone()).resolve(host).await?;
        let cart = open_cart(&config, &context);
        Self::with_cart(backend, config, context, table_id, cart).await
    }

    /// Open a session with an explicit cart
    pub async fn with_cart(
        backend: SharedBackend,
        config: ClientConfig,
        context: TenantContext,
        table_id: i64,
        cart: CartStore,
    ) -> ClientResult<Self> {
        let catalog = CatalogFetcher::new(backend.clone())
            .load_catalog(&context, table_id)
            .await?;
        Ok(Self {
            backend,
            config,
            context,
            catalog,
            cart,
            filter: CategoryFilter::All,
            last_order: None,
            tracker: None,
        })
    }

    pub fn context(&self) -> &TenantContext {
        &self.context
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The diner's table, or `TableNotFound`
    pub fn table(&self) -> ClientResult<&DiningTable> {
        self.catalog.table()
    }

    /// Look the table up again after a `TableNotFound`
    pub async fn reload_table(&mut self) -> ClientResult<&DiningTable> {
        let table = CatalogFetcher::new(self.backend.clone())
            .load_table(&self.context, self.catalog.table_id())
            .await?;
        self.catalog.set_table(table);
        self.catalog.table()
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn select_category(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// Menu items under the selected tab
    pub fn visible_items(&self) -> Vec<&MenuItem> {
        self.catalog.filter(self.filter)
    }

    /// Add one unit of a catalog item; `false` if it is not on the menu or
    /// the cart refused it
    pub fn add_item(&mut self, item_id: i64) -> bool {
        match self.catalog.item(item_id) {
            Some(item) => self.cart.add(item),
            None => false,
        }
    }

    /// Submit the cart and start tracking the new order
    pub async fn place_order(&mut self) -> ClientResult<&Order> {
        let table_id = self.catalog.table()?.id;
        let order = OrderSubmitter::new(self.backend.clone())
            .submit(&mut self.cart, &self.context, table_id)
            .await?;

        if let Some(previous) = self.tracker.take() {
            previous.cancel();
        }
        let tracker = StatusTracker::new(self.backend.clone(), self.context.clone(), &order);
        self.tracker = Some(tracker.spawn(self.config.tracker_config()));
        Ok(&*self.last_order.insert(order))
    }

    /// Most recently placed order, as confirmed at submission
    pub fn last_order(&self) -> Option<&Order> {
        self.last_order.as_ref()
    }

    /// Tracker of the most recent order
    pub fn tracker_mut(&mut self) -> Option<&mut TrackerHandle> {
        self.tracker.as_mut()
    }

    /// Stop tracking without ending the session
    pub fn stop_tracking(&mut self) {
        if let Some(tracker) = self.tracker.take() {
            tracker.cancel();
        }
    }
}

fn open_cart(config: &ClientConfig, context: &TenantContext) -> CartStore {
    match &config.storage_dir {
        Some(dir) => CartStore::open(FileCartStorage::new(
            dir.join(context.subdomain()),
            &config.cart_slot,
        )),
        None => CartStore::open(MemoryCartStorage::new()),
    }
}
