//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain reaches its collaborators (the
//! catalog reader, the order store, the access gate). Each trait exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants. Driving ports are the use-case traits HTTP handlers depend on.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use super::cart::Selection;
use super::error::Error;
use super::menu::{MenuItem, MenuItemId};
use super::order::{NewOrder, Order, OrderId, OrderStatus};

/// Identity of an authenticated staff member, as asserted by the access
/// gate. Opaque to the core beyond being present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffId(String);

/// Validation errors returned when constructing [`StaffId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StaffIdValidationError {
    /// Identifier is empty after trimming whitespace.
    #[error("staff id must not be empty")]
    Empty,
}

impl StaffId {
    /// Validate and construct a staff identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, StaffIdValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(StaffIdValidationError::Empty);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for StaffId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Per-request caller context handed to gated operations.
///
/// Inbound adapters build it from whatever authentication mechanism they
/// front (here: the session cookie); the domain only consults the gate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestContext {
    staff_id: Option<StaffId>,
}

impl RequestContext {
    /// Context for an unauthenticated walk-in customer.
    pub fn anonymous() -> Self {
        Self { staff_id: None }
    }

    /// Context for an authenticated staff member.
    pub fn staff(staff_id: StaffId) -> Self {
        Self {
            staff_id: Some(staff_id),
        }
    }

    /// The asserted staff identity, if any.
    pub fn staff_id(&self) -> Option<&StaffId> {
        self.staff_id.as_ref()
    }
}

/// Errors surfaced by catalog reader adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Catalog backend unreachable or timing out.
    #[error("menu catalog unavailable: {message}")]
    Unavailable { message: String },
}

impl CatalogError {
    /// Helper for availability failures.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Errors surfaced by order store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderStoreError {
    /// Store backend unreachable or timing out.
    #[error("order store unavailable: {message}")]
    Unavailable { message: String },
    /// The referenced order does not exist.
    #[error("order {id} does not exist")]
    NotFound { id: OrderId },
    /// The requested status change violates the transition table.
    /// `current` reports the status observed under the store's lock, so a
    /// repeated completion sees `Completed` here rather than a crash.
    #[error("order {id} cannot move from {current} to {requested}")]
    InvalidTransition {
        id: OrderId,
        current: OrderStatus,
        requested: OrderStatus,
    },
}

impl OrderStoreError {
    /// Helper for availability failures.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Read-only port onto the externally owned menu catalog.
#[async_trait]
pub trait MenuCatalog: Send + Sync {
    /// Resolve a single item by id. `Ok(None)` means the id is unknown.
    async fn find_item(&self, id: MenuItemId) -> Result<Option<MenuItem>, CatalogError>;

    /// List the full menu for display.
    async fn list_items(&self) -> Result<Vec<MenuItem>, CatalogError>;
}

/// Persistence port for order aggregates.
///
/// ## Guarantees required of adapters
/// - `create` assigns a fresh identifier and writes header and line items
///   as one unit; once it returns the order is visible to reads in full.
/// - `transition` is a compare-and-set per order id: concurrent calls are
///   serialised so exactly one succeeds and later ones observe the
///   already-applied status via [`OrderStoreError::InvalidTransition`].
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order atomically, returning it with its identifier.
    async fn create(&self, order: NewOrder) -> Result<Order, OrderStoreError>;

    /// Fetch an order with its line items.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderStoreError>;

    /// List orders in the given status, ordered by creation time ascending
    /// with the id as tiebreak, line items eagerly included.
    async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderStoreError>;

    /// Apply `Open -> Completed` (or reject anything else), returning the
    /// updated order.
    async fn transition(&self, id: OrderId, to: OrderStatus) -> Result<Order, OrderStoreError>;
}

/// Authorisation fact provider for staff-gated operations.
///
/// The gate is an external collaborator; the core consumes it as a boolean
/// capability check per request.
pub trait AccessGate: Send + Sync {
    /// Whether the caller may invoke staff-only operations.
    fn is_staff(&self, ctx: &RequestContext) -> bool;
}

/// Checkout submission as received from the presentation layer.
///
/// Raw strings are validated into domain newtypes by the lifecycle
/// controller so the taxonomy of rejections stays in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub table_number: String,
    pub observation: Option<String>,
    pub selections: Vec<Selection>,
}

/// Driving port for order mutations.
#[async_trait]
pub trait OrderCommand: Send + Sync {
    /// Price the selections and persist a new open order atomically.
    async fn checkout(&self, request: CheckoutRequest) -> Result<Order, Error>;

    /// Move an open order to completed. Staff only.
    async fn complete(&self, ctx: &RequestContext, id: OrderId) -> Result<Order, Error>;
}

/// Driving port for order reads.
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// Open orders for the staff console, oldest first. Staff only.
    async fn list_open(&self, ctx: &RequestContext) -> Result<Vec<Order>, Error>;

    /// Completed orders for the history view, oldest first. Staff only.
    async fn list_history(&self, ctx: &RequestContext) -> Result<Vec<Order>, Error>;
}
