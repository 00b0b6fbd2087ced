//! Persistence adapters for the order store port.

mod memory_order_store;

pub use memory_order_store::InMemoryOrderStore;
