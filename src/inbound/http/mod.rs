//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod menu;
pub mod orders;
pub mod session;
pub mod staff;
pub mod state;
pub mod test_utils;

pub use error::ApiResult;
