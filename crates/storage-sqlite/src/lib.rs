//! SQLite storage implementation for Moneyboard.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `moneyboard-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! All writes are funneled through a single writer actor ([`WriteHandle`]), so
//! multi-statement operations such as refresh-token rotation or moving money
//! into a pot are atomic and never interleave.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod balance;
pub mod budgets;
pub mod pots;
pub mod refresh_tokens;
pub mod transactions;
pub mod users;

#[cfg(test)]
mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, ping, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from moneyboard-core for convenience
pub use moneyboard_core::errors::{DatabaseError, Error, Result};
