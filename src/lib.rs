//! Order and cart lifecycle engine for a walk-in restaurant ordering system.
//!
//! The domain core (checkout pricing, the order state machine, and the
//! staff read paths) lives in [`domain`]; [`inbound`] and [`outbound`] hold
//! the HTTP and persistence adapters, and [`server`] wires them together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
