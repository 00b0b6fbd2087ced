//! Domain core: aggregates, ports, and the order lifecycle services.
//!
//! Purpose: hold the order and cart lifecycle engine free of transport and
//! storage concerns. Types stay immutable where the lifecycle requires it
//! (line item snapshots, completed orders) and document their invariants in
//! each type's Rustdoc.

pub mod cart;
pub mod error;
pub mod menu;
pub mod order;
pub mod order_service;
pub mod ports;

pub use self::error::{Error, ErrorCode};
pub use self::menu::{MenuItem, MenuItemId, Price};
pub use self::order::{LineItem, Order, OrderId, OrderStatus};
pub use self::order_service::{OrderCommandService, OrderQueryService};
