//! Moneyboard Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for Moneyboard: session renewal,
//! budgets, pots, transactions and balances. It is database-agnostic and
//! defines traits that are implemented by the `storage-sqlite` crate.

pub mod auth;
pub mod balance;
pub mod budgets;
pub mod constants;
pub mod errors;
pub mod pots;
pub mod transactions;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
