//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `ListingStore`
//! trait defined in `dealboard_core::storage`. Postgres backs the running
//! application; the in-memory store backs the test suite.

mod postgres;

#[cfg(test)]
mod memory;

pub use postgres::PostgresListingStore;

#[cfg(test)]
pub use memory::MemoryListingStore;
