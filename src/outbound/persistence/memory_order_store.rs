//! In-process order store.
//!
//! The shelf is the sole mutable shared resource in the core, so it is the
//! unit of atomicity for both creation and transition: every mutation runs
//! under the write lock, and `transition` re-reads the status under that
//! lock (compare-and-set, never read-then-write across awaits).

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::order::{NewOrder, Order, OrderId, OrderStatus};
use crate::domain::ports::{OrderStore, OrderStoreError};

#[derive(Default)]
struct Shelf {
    next_id: u64,
    orders: BTreeMap<OrderId, Order>,
}

/// Order store backed by process memory behind a [`tokio::sync::RwLock`].
///
/// Identifiers are monotonic and never reused, so iteration over the
/// `BTreeMap` already follows creation order; listings still sort by
/// creation time with the id as tiebreak to keep the contract explicit.
#[derive(Default)]
pub struct InMemoryOrderStore {
    shelf: RwLock<Shelf>,
}

impl InMemoryOrderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: NewOrder) -> Result<Order, OrderStoreError> {
        let mut shelf = self.shelf.write().await;
        shelf.next_id += 1;
        let id = OrderId::new(shelf.next_id);
        let order = Order::from_parts(id, OrderStatus::Open, order);
        shelf.orders.insert(id, order.clone());
        debug!(order_id = id.value(), "order persisted");
        Ok(order)
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderStoreError> {
        let shelf = self.shelf.read().await;
        Ok(shelf.orders.get(&id).cloned())
    }

    async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderStoreError> {
        let shelf = self.shelf.read().await;
        let mut orders: Vec<Order> = shelf
            .orders
            .values()
            .filter(|order| order.status() == status)
            .cloned()
            .collect();
        orders.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then(a.id().cmp(&b.id()))
        });
        Ok(orders)
    }

    async fn transition(&self, id: OrderId, to: OrderStatus) -> Result<Order, OrderStoreError> {
        let mut shelf = self.shelf.write().await;
        let order = shelf
            .orders
            .get(&id)
            .cloned()
            .ok_or(OrderStoreError::NotFound { id })?;

        let current = order.status();
        if !current.can_transition_to(to) {
            return Err(OrderStoreError::InvalidTransition {
                id,
                current,
                requested: to,
            });
        }

        let updated = order.with_status(to);
        shelf.orders.insert(id, updated.clone());
        debug!(order_id = id.value(), status = %to, "order transitioned");
        Ok(updated)
    }
}
