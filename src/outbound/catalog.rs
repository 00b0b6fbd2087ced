//! Menu catalog adapter.
//!
//! The catalog is owned by an external collaborator; this adapter serves a
//! seeded snapshot of it through the [`MenuCatalog`] port. The interior
//! lock exists so menu maintenance (performed outside the core) can swap
//! entries without disturbing readers; tests rely on this to prove order
//! snapshots survive catalog edits.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::menu::{MenuItem, MenuItemId, Price};
use crate::domain::ports::{CatalogError, MenuCatalog};

/// Catalog reader backed by an in-process item table.
pub struct StaticMenuCatalog {
    items: RwLock<BTreeMap<MenuItemId, MenuItem>>,
}

impl StaticMenuCatalog {
    /// Build a catalog from the given items.
    pub fn with_items(items: Vec<MenuItem>) -> Self {
        Self {
            items: RwLock::new(items.into_iter().map(|item| (item.id, item)).collect()),
        }
    }

    /// Default menu used at startup and in tests, covering the four seeded
    /// categories: Main Course, Dessert, Beverage, and Salad.
    pub fn sample() -> Self {
        fn item(id: u32, name: &str, cents: i64, category: &str) -> MenuItem {
            MenuItem {
                id: MenuItemId::new(id),
                name: name.to_owned(),
                description: format!("{name} from the house menu"),
                // Seed prices are fixed, valid amounts.
                price: Price::from_cents(cents).unwrap_or(Price::ZERO),
                category: category.to_owned(),
                image_url: format!("/static/images/{}.webp", id),
            }
        }

        Self::with_items(vec![
            item(1, "Feijoada", 3200, "Main Course"),
            item(2, "Moqueca", 3800, "Main Course"),
            item(3, "Pastel de Queijo", 450, "Main Course"),
            item(4, "Brigadeiro", 300, "Dessert"),
            item(5, "Pudim", 600, "Dessert"),
            item(6, "Caipirinha", 950, "Beverage"),
            item(7, "Guarana", 350, "Beverage"),
            item(8, "Salada Tropical", 1100, "Salad"),
        ])
    }

    /// Replace or insert a catalog entry. Used by menu maintenance, which
    /// lives outside the core; never consulted by existing orders.
    pub async fn upsert(&self, item: MenuItem) {
        self.items.write().await.insert(item.id, item);
    }

    /// Remove a catalog entry.
    pub async fn remove(&self, id: MenuItemId) {
        self.items.write().await.remove(&id);
    }
}

#[async_trait]
impl MenuCatalog for StaticMenuCatalog {
    async fn find_item(&self, id: MenuItemId) -> Result<Option<MenuItem>, CatalogError> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn list_items(&self) -> Result<Vec<MenuItem>, CatalogError> {
        Ok(self.items.read().await.values().cloned().collect())
    }
}
