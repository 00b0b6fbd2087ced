//! Order lifecycle services.
//!
//! These services implement the order driving ports: checkout orchestration
//! for walk-in customers and the staff-gated completion and read paths that
//! serve the console and history views.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::domain::cart;
use crate::domain::error::Error;
use crate::domain::menu::{MenuItem, MenuItemId};
use crate::domain::order::{
    CustomerName, NewOrder, Order, OrderId, OrderStatus, OrderValidationError, TableNumber,
};
use crate::domain::ports::{
    AccessGate, CatalogError, CheckoutRequest, MenuCatalog, OrderCommand, OrderQuery, OrderStore,
    OrderStoreError, RequestContext,
};

fn map_catalog_error(error: CatalogError) -> Error {
    match error {
        CatalogError::Unavailable { message } => {
            Error::service_unavailable(format!("menu catalog unavailable: {message}"))
        }
    }
}

fn map_store_error(error: OrderStoreError) -> Error {
    match error {
        OrderStoreError::Unavailable { message } => {
            Error::service_unavailable(format!("order store unavailable: {message}"))
        }
        OrderStoreError::NotFound { id } => Error::not_found(format!("order {id} not found")),
        OrderStoreError::InvalidTransition {
            id,
            current,
            requested,
        } => Error::invalid_transition(format!(
            "order {id} cannot move from {current} to {requested}"
        ))
        .with_details(json!({ "orderId": id.value(), "status": current.to_string() })),
    }
}

fn map_validation_error(error: OrderValidationError) -> Error {
    match error {
        OrderValidationError::EmptyCustomerName => {
            Error::invalid_request("customer name must not be empty")
                .with_details(json!({ "field": "customer_name" }))
        }
        OrderValidationError::EmptyTableNumber => {
            Error::invalid_request("table number must not be empty")
                .with_details(json!({ "field": "table_number" }))
        }
        OrderValidationError::ZeroQuantity | OrderValidationError::NoLineItems => {
            Error::empty_order("order must contain at least one item")
        }
    }
}

/// Order service implementing the command driving port.
#[derive(Clone)]
pub struct OrderCommandService<S, C, G> {
    store: Arc<S>,
    catalog: Arc<C>,
    gate: Arc<G>,
}

impl<S, C, G> OrderCommandService<S, C, G> {
    /// Create a new command service over the store, catalog, and gate.
    pub fn new(store: Arc<S>, catalog: Arc<C>, gate: Arc<G>) -> Self {
        Self {
            store,
            catalog,
            gate,
        }
    }
}

impl<S, C, G> OrderCommandService<S, C, G>
where
    C: MenuCatalog,
{
    /// Resolve every selected id against the catalog. Any miss aborts the
    /// checkout wholesale; partial pricing would corrupt the bill.
    async fn resolve_items(
        &self,
        selections: &[cart::Selection],
    ) -> Result<HashMap<MenuItemId, MenuItem>, Error> {
        let mut items = HashMap::with_capacity(selections.len());
        for selection in selections {
            let item = self
                .catalog
                .find_item(selection.item_id)
                .await
                .map_err(map_catalog_error)?
                .ok_or_else(|| {
                    Error::unknown_item(format!("menu item {} does not exist", selection.item_id))
                        .with_details(json!({ "itemId": selection.item_id.value() }))
                })?;
            items.insert(item.id, item);
        }
        Ok(items)
    }
}

#[async_trait]
impl<S, C, G> OrderCommand for OrderCommandService<S, C, G>
where
    S: OrderStore,
    C: MenuCatalog,
    G: AccessGate,
{
    async fn checkout(&self, request: CheckoutRequest) -> Result<Order, Error> {
        let customer_name =
            CustomerName::new(request.customer_name).map_err(map_validation_error)?;
        let table_number = TableNumber::new(request.table_number).map_err(map_validation_error)?;
        let observation = request.observation.unwrap_or_default();

        let selections = cart::normalise(&request.selections);
        if selections.is_empty() {
            return Err(Error::empty_order(
                "checkout requires at least one item with a positive quantity",
            ));
        }

        let items = self.resolve_items(&selections).await?;
        let line_items = cart::price(&selections, &items).map_err(|err| match err {
            cart::CartError::UnknownItem(id) => {
                Error::unknown_item(format!("menu item {id} does not exist"))
                    .with_details(json!({ "itemId": id.value() }))
            }
        })?;

        let new_order = NewOrder::try_new(
            customer_name,
            table_number,
            observation,
            Utc::now(),
            line_items,
        )
        .map_err(map_validation_error)?;

        let order = self.store.create(new_order).await.map_err(map_store_error)?;
        info!(
            order_id = order.id().value(),
            total_cents = order.order_total().cents(),
            lines = order.line_items().len(),
            "order created"
        );
        Ok(order)
    }

    async fn complete(&self, ctx: &RequestContext, id: OrderId) -> Result<Order, Error> {
        if !self.gate.is_staff(ctx) {
            return Err(Error::unauthorized("staff capability required"));
        }

        let order = self
            .store
            .transition(id, OrderStatus::Completed)
            .await
            .map_err(map_store_error)?;
        info!(order_id = order.id().value(), "order completed");
        Ok(order)
    }
}

/// Order service implementing the query driving port.
#[derive(Clone)]
pub struct OrderQueryService<S, G> {
    store: Arc<S>,
    gate: Arc<G>,
}

impl<S, G> OrderQueryService<S, G> {
    /// Create a new query service over the store and gate.
    pub fn new(store: Arc<S>, gate: Arc<G>) -> Self {
        Self { store, gate }
    }
}

impl<S, G> OrderQueryService<S, G>
where
    S: OrderStore,
    G: AccessGate,
{
    async fn list(&self, ctx: &RequestContext, status: OrderStatus) -> Result<Vec<Order>, Error> {
        if !self.gate.is_staff(ctx) {
            return Err(Error::unauthorized("staff capability required"));
        }
        self.store
            .list_by_status(status)
            .await
            .map_err(map_store_error)
    }
}

#[async_trait]
impl<S, G> OrderQuery for OrderQueryService<S, G>
where
    S: OrderStore,
    G: AccessGate,
{
    async fn list_open(&self, ctx: &RequestContext) -> Result<Vec<Order>, Error> {
        self.list(ctx, OrderStatus::Open).await
    }

    async fn list_history(&self, ctx: &RequestContext) -> Result<Vec<Order>, Error> {
        self.list(ctx, OrderStatus::Completed).await
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;
