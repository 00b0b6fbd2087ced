//! Order aggregate and its state machine.
//!
//! An order is created once at checkout and thereafter only moves through
//! the single legal status transition `Open -> Completed`. Line items carry
//! name and price snapshots taken at checkout so later catalog edits never
//! rewrite history.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::menu::{MenuItemId, Price};

/// Validation errors raised when constructing order field newtypes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderValidationError {
    /// Customer name is empty after trimming whitespace.
    #[error("customer name must not be empty")]
    EmptyCustomerName,
    /// Table number is empty after trimming whitespace.
    #[error("table number must not be empty")]
    EmptyTableNumber,
    /// Line items require a quantity of at least one.
    #[error("line item quantity must be at least 1")]
    ZeroQuantity,
    /// Orders must contain at least one line item.
    #[error("an order must contain at least one line item")]
    NoLineItems,
}

/// Store-assigned order identifier. Stable and never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Wrap a raw store identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name the walk-in customer gave at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerName(String);

impl CustomerName {
    /// Validate and construct a customer name.
    pub fn new(name: impl Into<String>) -> Result<Self, OrderValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(OrderValidationError::EmptyCustomerName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for CustomerName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<CustomerName> for String {
    fn from(value: CustomerName) -> Self {
        value.0
    }
}

impl TryFrom<String> for CustomerName {
    type Error = OrderValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Table label for the order, e.g. `"7"` or `"12A"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableNumber(String);

impl TableNumber {
    /// Validate and construct a table number.
    pub fn new(table: impl Into<String>) -> Result<Self, OrderValidationError> {
        let table = table.into();
        if table.trim().is_empty() {
            return Err(OrderValidationError::EmptyTableNumber);
        }
        Ok(Self(table))
    }
}

impl AsRef<str> for TableNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<TableNumber> for String {
    fn from(value: TableNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for TableNumber {
    type Error = OrderValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Line quantity, at least one inside a persisted order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Validate and construct a quantity.
    pub fn new(quantity: u32) -> Result<Self, OrderValidationError> {
        if quantity == 0 {
            return Err(OrderValidationError::ZeroQuantity);
        }
        Ok(Self(quantity))
    }

    /// Access the raw count.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = OrderValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lifecycle status of an order.
///
/// The transition table is closed: the only legal edge is
/// `Open -> Completed`. Completed orders are history and never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created by checkout; visible on the active-orders console.
    Open,
    /// Terminal; visible only in the history view.
    Completed,
}

impl OrderStatus {
    /// Whether the state machine permits moving from `self` to `target`.
    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        matches!((self, target), (OrderStatus::Open, OrderStatus::Completed))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Open => f.write_str("open"),
            OrderStatus::Completed => f.write_str("completed"),
        }
    }
}

/// One priced, quantified menu item within an order.
///
/// `menu_item_name` and `unit_price` are snapshots taken at checkout, not
/// live catalog references; they survive later edits and deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    menu_item_id: MenuItemId,
    menu_item_name: String,
    unit_price: Price,
    quantity: Quantity,
}

impl LineItem {
    /// Construct a line item from a catalog snapshot.
    pub fn new(
        menu_item_id: MenuItemId,
        menu_item_name: impl Into<String>,
        unit_price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            menu_item_id,
            menu_item_name: menu_item_name.into(),
            unit_price,
            quantity,
        }
    }

    /// Catalog identifier of the item this line snapshots.
    pub fn menu_item_id(&self) -> MenuItemId {
        self.menu_item_id
    }

    /// Item name frozen at checkout.
    pub fn menu_item_name(&self) -> &str {
        self.menu_item_name.as_str()
    }

    /// Unit price frozen at checkout.
    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Ordered quantity.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Derived line total: unit price times quantity.
    pub fn total_price(&self) -> Price {
        self.unit_price.total(self.quantity.value())
    }
}

/// Header and line items for an order about to be persisted.
///
/// The store assigns the identifier on create; everything else is fixed
/// here by the lifecycle controller.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_name: CustomerName,
    pub table_number: TableNumber,
    pub observation: String,
    pub created_at: DateTime<Utc>,
    pub line_items: Vec<LineItem>,
}

impl NewOrder {
    /// Validate the aggregate-level invariant that at least one line item
    /// is present.
    pub fn try_new(
        customer_name: CustomerName,
        table_number: TableNumber,
        observation: String,
        created_at: DateTime<Utc>,
        line_items: Vec<LineItem>,
    ) -> Result<Self, OrderValidationError> {
        if line_items.is_empty() {
            return Err(OrderValidationError::NoLineItems);
        }
        Ok(Self {
            customer_name,
            table_number,
            observation,
            created_at,
            line_items,
        })
    }
}

/// Persisted order aggregate.
///
/// ## Invariants
/// - At least one line item, in checkout insertion order.
/// - `status` only ever moves `Open -> Completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_name: CustomerName,
    table_number: TableNumber,
    observation: String,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    line_items: Vec<LineItem>,
}

impl Order {
    /// Materialise a persisted order. Called by store adapters once an
    /// identifier has been assigned.
    pub fn from_parts(id: OrderId, status: OrderStatus, new_order: NewOrder) -> Self {
        let NewOrder {
            customer_name,
            table_number,
            observation,
            created_at,
            line_items,
        } = new_order;
        Self {
            id,
            customer_name,
            table_number,
            observation,
            status,
            created_at,
            line_items,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Customer name captured at checkout.
    pub fn customer_name(&self) -> &str {
        self.customer_name.as_ref()
    }

    /// Table label captured at checkout.
    pub fn table_number(&self) -> &str {
        self.table_number.as_ref()
    }

    /// Free-text note for the kitchen, empty when none was given.
    pub fn observation(&self) -> &str {
        self.observation.as_str()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Creation timestamp, stamped by the lifecycle controller.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Line items in checkout insertion order.
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Derived order total: the sum of all line totals.
    pub fn order_total(&self) -> Price {
        self.line_items
            .iter()
            .fold(Price::ZERO, |acc, line| acc.plus(line.total_price()))
    }

    /// Apply a status transition that the store has already authorised via
    /// [`OrderStatus::can_transition_to`].
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn line(id: u32, name: &str, cents: i64, qty: u32) -> LineItem {
        LineItem::new(
            MenuItemId::new(id),
            name,
            Price::from_cents(cents).expect("valid price"),
            Quantity::new(qty).expect("valid quantity"),
        )
    }

    fn order_with_lines(lines: Vec<LineItem>) -> Order {
        let new_order = NewOrder::try_new(
            CustomerName::new("Ana").expect("valid name"),
            TableNumber::new("4").expect("valid table"),
            String::new(),
            Utc::now(),
            lines,
        )
        .expect("at least one line");
        Order::from_parts(OrderId::new(1), OrderStatus::Open, new_order)
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_customer_name_is_rejected(#[case] raw: &str) {
        let err = CustomerName::new(raw).expect_err("blank name rejected");
        assert_eq!(err, OrderValidationError::EmptyCustomerName);
    }

    #[rstest]
    #[case("")]
    #[case(" \t")]
    fn blank_table_number_is_rejected(#[case] raw: &str) {
        let err = TableNumber::new(raw).expect_err("blank table rejected");
        assert_eq!(err, OrderValidationError::EmptyTableNumber);
    }

    #[rstest]
    fn zero_quantity_is_rejected() {
        let err = Quantity::new(0).expect_err("zero rejected");
        assert_eq!(err, OrderValidationError::ZeroQuantity);
    }

    #[rstest]
    fn orders_require_line_items() {
        let err = NewOrder::try_new(
            CustomerName::new("Ana").expect("valid name"),
            TableNumber::new("4").expect("valid table"),
            String::new(),
            Utc::now(),
            Vec::new(),
        )
        .expect_err("empty orders rejected");
        assert_eq!(err, OrderValidationError::NoLineItems);
    }

    #[rstest]
    fn order_total_sums_line_totals() {
        // 2 x 5.00 + 1 x 12.00 = 22.00.
        let order = order_with_lines(vec![
            line(3, "Feijoada", 500, 2),
            line(7, "Moqueca", 1200, 1),
        ]);
        assert_eq!(order.line_items()[0].total_price().cents(), 1000);
        assert_eq!(order.line_items()[1].total_price().cents(), 1200);
        assert_eq!(order.order_total().cents(), 2200);
    }

    #[rstest]
    #[case(OrderStatus::Open, OrderStatus::Completed, true)]
    #[case(OrderStatus::Open, OrderStatus::Open, false)]
    #[case(OrderStatus::Completed, OrderStatus::Open, false)]
    #[case(OrderStatus::Completed, OrderStatus::Completed, false)]
    fn transition_table_is_closed(
        #[case] from: OrderStatus,
        #[case] to: OrderStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[rstest]
    fn status_serialises_snake_case() {
        let open = serde_json::to_value(OrderStatus::Open).expect("serialise");
        let completed = serde_json::to_value(OrderStatus::Completed).expect("serialise");
        assert_eq!(open, serde_json::json!("open"));
        assert_eq!(completed, serde_json::json!("completed"));
    }

    #[rstest]
    fn line_items_preserve_insertion_order() {
        let order = order_with_lines(vec![
            line(9, "Brigadeiro", 300, 1),
            line(2, "Caipirinha", 950, 2),
            line(5, "Pastel", 450, 3),
        ]);
        let ids: Vec<u32> = order
            .line_items()
            .iter()
            .map(|item| item.menu_item_id().value())
            .collect();
        assert_eq!(ids, vec![9, 2, 5]);
    }
}
