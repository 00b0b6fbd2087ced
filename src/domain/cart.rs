//! Cart aggregation: turning client-held selections into priced line items.
//!
//! The cart never lives on the server. Clients submit the whole selection
//! set at checkout and pricing happens here, against the catalog, in one
//! authoritative step. Both functions are pure so the lifecycle controller
//! can fetch catalog data at its own suspension points.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::menu::{MenuItem, MenuItemId};
use super::order::{LineItem, Quantity};

/// One entry of the client-held cart: an item id and a desired quantity.
///
/// A quantity of zero is equivalent to absence and is dropped during
/// normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Selection {
    pub item_id: MenuItemId,
    pub quantity: u32,
}

/// Failures raised while pricing a selection set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// A selection references an item the catalog could not resolve.
    /// Pricing aborts wholesale; partial pricing would corrupt the bill.
    #[error("menu item {0} does not exist")]
    UnknownItem(MenuItemId),
}

/// Drop zero-quantity entries and merge duplicate ids.
///
/// Selections are a mapping from item id to quantity, so duplicate ids in
/// the wire list are merged by summing into the first occurrence. The
/// caller-supplied ordering of first appearances is preserved for
/// predictable display.
pub fn normalise(selections: &[Selection]) -> Vec<Selection> {
    let mut order: Vec<MenuItemId> = Vec::new();
    let mut quantities: HashMap<MenuItemId, u32> = HashMap::new();
    for selection in selections {
        if selection.quantity == 0 {
            continue;
        }
        let entry = quantities.entry(selection.item_id).or_insert_with(|| {
            order.push(selection.item_id);
            0
        });
        *entry = entry.saturating_add(selection.quantity);
    }
    order
        .into_iter()
        .map(|item_id| Selection {
            item_id,
            quantity: quantities[&item_id],
        })
        .collect()
}

/// Price normalised selections against resolved catalog items.
///
/// `items` must hold an entry for every selected id; a missing entry fails
/// the whole operation with [`CartError::UnknownItem`]. Output order
/// follows the selection order, not catalog order.
pub fn price(
    selections: &[Selection],
    items: &HashMap<MenuItemId, MenuItem>,
) -> Result<Vec<LineItem>, CartError> {
    let mut lines = Vec::with_capacity(selections.len());
    for selection in selections {
        // A zero entry is equivalent to absence even if the caller skipped
        // normalisation.
        let Ok(quantity) = Quantity::new(selection.quantity) else {
            continue;
        };
        let item = items
            .get(&selection.item_id)
            .ok_or(CartError::UnknownItem(selection.item_id))?;
        lines.push(LineItem::new(
            item.id,
            item.name.clone(),
            item.price,
            quantity,
        ));
    }
    Ok(lines)
}
