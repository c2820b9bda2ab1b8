//! Menu and table loading for the resolved tenant

use crate::backend::SharedBackend;
use crate::tenant::TenantContext;
use crate::{ClientError, ClientResult};
use shared::{CategoryFilter, DiningTable, MenuItem};

/// What the ordering screen shows: active menu plus the diner's table
#[derive(Debug, Clone)]
pub struct Catalog {
    pub items: Vec<MenuItem>,
    table_id: i64,
    table: Option<DiningTable>,
}

impl Catalog {
    /// The diner's table, or [`ClientError::TableNotFound`]
    ///
    /// A missing table is recoverable: the menu stays browsable, only
    /// submission is blocked.
    pub fn table(&self) -> ClientResult<&DiningTable> {
        self.table
            .as_ref()
            .ok_or(ClientError::TableNotFound(self.table_id))
    }

    /// Table id taken from the access link
    pub fn table_id(&self) -> i64 {
        self.table_id
    }

    pub fn item(&self, item_id: i64) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Items shown under a category tab, in backend order
    pub fn filter(&self, filter: CategoryFilter) -> Vec<&MenuItem> {
        self.items.iter().filter(|i| filter.matches(i)).collect()
    }

    pub(crate) fn set_table(&mut self, table: Option<DiningTable>) {
        self.table = table;
    }
}

/// Loads the menu and table of one tenant
pub struct CatalogFetcher {
    backend: SharedBackend,
}

impl CatalogFetcher {
    pub fn new(backend: SharedBackend) -> Self {
        Self { backend }
    }

    /// Load menu and table concurrently
    ///
    /// A menu failure fails the call. An absent table does not; it shows up
    /// through [`Catalog::table`].
    pub async fn load_catalog(&self, ctx: &TenantContext, table_id: i64) -> ClientResult<Catalog> {
        let (items, table) = tokio::join!(self.load_menu(ctx), self.load_table(ctx, table_id));
        let items = items?;
        let table = table?;

        tracing::info!(
            tenant_id = %ctx.tenant_id(),
            items = items.len(),
            table_id,
            table_found = table.is_some(),
            "Catalog loaded"
        );
        Ok(Catalog {
            items,
            table_id,
            table,
        })
    }

    /// Active menu items of the tenant; foreign or inactive rows are dropped
    pub async fn load_menu(&self, ctx: &TenantContext) -> ClientResult<Vec<MenuItem>> {
        let items = self.backend.active_menu_items(ctx.tenant_id()).await?;
        let total = items.len();
        let items: Vec<MenuItem> = items
            .into_iter()
            .filter(|i| ctx.owns(&i.tenant_id) && i.is_active)
            .collect();
        if items.len() != total {
            tracing::warn!(
                tenant_id = %ctx.tenant_id(),
                dropped = total - items.len(),
                "Backend returned menu items outside the active tenant menu"
            );
        }
        Ok(items)
    }

    /// The table if it exists and belongs to the tenant
    pub async fn load_table(
        &self,
        ctx: &TenantContext,
        table_id: i64,
    ) -> ClientResult<Option<DiningTable>> {
        let table = self.backend.find_table(ctx.tenant_id(), table_id).await?;
        Ok(table.filter(|t| {
            let owned = ctx.owns(&t.tenant_id);
            if !owned {
                tracing::warn!(
                    tenant_id = %ctx.tenant_id(),
                    table_id,
                    "Backend returned a table owned by another tenant"
                );
            }
            owned
        }))
    }
}
