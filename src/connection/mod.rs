//! Connection management for db-relay.
//!
//! Centralizes connection lifecycle and lookup by name.

pub mod registry;

pub use registry::ConnectionRegistry;
