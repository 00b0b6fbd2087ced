//! Driven adapters implementing the domain ports.

pub mod access;
pub mod catalog;
pub mod persistence;
