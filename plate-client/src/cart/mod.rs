//! Cart of the current diner
//!
//! Lines are unique by item id and keep insertion order. Every mutation
//! writes the whole cart to its storage slot; a failed write is logged and
//! the in-memory cart stays authoritative.

mod storage;

pub use storage::{CartStorage, FileCartStorage, MemoryCartStorage, StorageError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::money;
use shared::{MenuItem, OrderItem};
use std::collections::HashSet;

/// One cart line: a menu item with a positive quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "id")]
    pub item_id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CartLine {
    fn from_item(item: &MenuItem) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            price: item.price,
            quantity: 1,
            description: item.description.clone(),
            category: Some(item.category.clone()),
        }
    }

    pub fn line_total(&self) -> Decimal {
        money::line_total(self.price, self.quantity)
    }
}

/// Cart store bound to one storage slot
pub struct CartStore {
    lines: Vec<CartLine>,
    storage: Box<dyn CartStorage>,
}

impl CartStore {
    /// Open the cart, restoring whatever the slot holds
    ///
    /// A slot that is unreadable or does not hold a valid cart yields an
    /// empty cart.
    pub fn open(storage: impl CartStorage + 'static) -> Self {
        let lines = rehydrate(&storage);
        if !lines.is_empty() {
            tracing::debug!(lines = lines.len(), "Cart restored");
        }
        Self {
            lines,
            storage: Box::new(storage),
        }
    }

    /// Cart that is never persisted beyond this process
    pub fn in_memory() -> Self {
        Self::open(MemoryCartStorage::new())
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, item_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item_id == item_id)
    }

    /// Quantity of one item, 0 if absent
    pub fn quantity_of(&self, item_id: i64) -> u32 {
        self.line(item_id).map_or(0, |l| l.quantity)
    }

    /// Total units across all lines
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Exact `Σ price × quantity`
    pub fn total(&self) -> Decimal {
        money::sum_lines(self.lines.iter().map(|l| (l.price, l.quantity)))
    }

    /// Total in the two-decimal display convention
    pub fn formatted_total(&self) -> String {
        money::format_money(self.total())
    }

    /// Add one unit of `item`, appending a new line if needed
    ///
    /// Returns `false` and leaves the cart untouched when the item's price
    /// is out of range or its line is already at [`money::MAX_LINE_QUANTITY`].
    pub fn add(&mut self, item: &MenuItem) -> bool {
        if !money::is_valid_price(item.price) {
            tracing::warn!(item_id = item.id, price = %item.price, "Refusing item with out-of-range price");
            return false;
        }
        match self.lines.iter_mut().find(|l| l.item_id == item.id) {
            Some(line) => match line.quantity.checked_add(1) {
                Some(quantity) if quantity <= money::MAX_LINE_QUANTITY => line.quantity = quantity,
                _ => {
                    tracing::warn!(item_id = item.id, quantity = line.quantity, "Line quantity at limit");
                    return false;
                }
            },
            None => self.lines.push(CartLine::from_item(item)),
        }
        self.persist();
        true
    }

    /// Remove one unit; the line disappears when its quantity reaches zero
    pub fn decrement(&mut self, item_id: i64) {
        let Some(pos) = self.lines.iter().position(|l| l.item_id == item_id) else {
            return;
        };
        if self.lines[pos].quantity > 1 {
            self.lines[pos].quantity -= 1;
        } else {
            self.lines.remove(pos);
        }
        self.persist();
    }

    /// Remove the whole line regardless of quantity
    pub fn remove_completely(&mut self, item_id: i64) {
        let before = self.lines.len();
        self.lines.retain(|l| l.item_id != item_id);
        if self.lines.len() != before {
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// Immutable order lines for submission
    pub fn snapshot(&self) -> Vec<OrderItem> {
        self.lines
            .iter()
            .map(|l| OrderItem {
                id: l.item_id,
                name: l.name.clone(),
                price: l.price,
                quantity: l.quantity,
            })
            .collect()
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.lines)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.save(&json));
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

fn rehydrate(storage: &dyn CartStorage) -> Vec<CartLine> {
    let raw = match storage.load() {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read persisted cart, starting empty");
            return Vec::new();
        }
    };
    match parse_lines(&raw) {
        Ok(lines) => lines,
        Err(reason) => {
            tracing::warn!(reason = %reason, "Discarding malformed persisted cart");
            Vec::new()
        }
    }
}

fn parse_lines(raw: &str) -> Result<Vec<CartLine>, String> {
    let lines: Vec<CartLine> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let mut seen = HashSet::new();
    for line in &lines {
        if line.quantity == 0 || line.quantity > money::MAX_LINE_QUANTITY {
            return Err(format!(
                "item {} has quantity {} outside 1..={}",
                line.item_id,
                line.quantity,
                money::MAX_LINE_QUANTITY
            ));
        }
        if !money::is_valid_price(line.price) {
            return Err(format!("item {} has invalid price {}", line.item_id, line.price));
        }
        if !seen.insert(line.item_id) {
            return Err(format!("item {} appears twice", line.item_id));
        }
    }
    Ok(lines)
}
