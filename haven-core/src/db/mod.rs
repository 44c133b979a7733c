//! Database layer for haven
//!
//! This module provides the durable event store using SQLite with:
//! - Schema migrations
//! - Repository pattern for queries
//! - An [`crate::store::EventStore`] implementation

pub mod repo;
pub mod schema;

pub use repo::Database;
