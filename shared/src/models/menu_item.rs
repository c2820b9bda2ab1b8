//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub tenant_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price, never negative
    pub price: Decimal,
    /// Free text, matched against [`MenuCategory`] for display
    pub category: String,
    pub is_active: bool,
}

impl MenuItem {
    /// Display category, if the free-text category is part of the taxonomy
    pub fn menu_category(&self) -> Option<MenuCategory> {
        MenuCategory::parse(&self.category)
    }
}

/// Fixed display taxonomy of the ordering screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuCategory {
    Main,
    Appetizer,
    Dessert,
    Drink,
}

impl MenuCategory {
    pub const ALL: [MenuCategory; 4] = [
        MenuCategory::Main,
        MenuCategory::Appetizer,
        MenuCategory::Dessert,
        MenuCategory::Drink,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::Appetizer => "Appetizer",
            Self::Dessert => "Dessert",
            Self::Drink => "Drink",
        }
    }

    /// Exact match against the display name
    pub fn parse(category: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == category)
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category tab selection on the ordering screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(MenuCategory),
}

impl CategoryFilter {
    /// Tabs in display order: All first, then the taxonomy
    pub fn tabs() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(MenuCategory::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.as_str(),
        }
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => item.category == category.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: &str) -> MenuItem {
        MenuItem {
            id: 1,
            tenant_id: "t-1".into(),
            name: "Soup".into(),
            description: None,
            price: Decimal::new(450, 2),
            category: category.into(),
            is_active: true,
        }
    }

    #[test]
    fn test_category_parse_is_exact() {
        assert_eq!(MenuCategory::parse("Drink"), Some(MenuCategory::Drink));
        assert_eq!(MenuCategory::parse("drink"), None);
        assert_eq!(MenuCategory::parse("Sides"), None);
    }

    #[test]
    fn test_filter_matches() {
        let soup = item("Appetizer");
        assert!(CategoryFilter::All.matches(&soup));
        assert!(CategoryFilter::Only(MenuCategory::Appetizer).matches(&soup));
        assert!(!CategoryFilter::Only(MenuCategory::Main).matches(&soup));

        let special = item("Chef's special");
        assert!(CategoryFilter::All.matches(&special));
        assert!(special.menu_category().is_none());
        assert!(
            MenuCategory::ALL
                .into_iter()
                .all(|c| !CategoryFilter::Only(c).matches(&special))
        );
    }

    #[test]
    fn test_tabs_order() {
        let labels: Vec<_> = CategoryFilter::tabs().iter().map(|t| t.label()).collect();
        assert_eq!(labels, ["All", "Main", "Appetizer", "Dessert", "Drink"]);
    }

    #[test]
    fn test_price_accepts_number_or_string() {
        let json = r#"{"id":1,"tenant_id":"t","name":"Tea","price":2.5,"category":"Drink","is_active":true}"#;
        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price, Decimal::new(25, 1));

        let json = r#"{"id":1,"tenant_id":"t","name":"Tea","price":"2.50","category":"Drink","is_active":true}"#;
        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price, Decimal::new(250, 2));
    }
}
