//! SQLite storage implementation for balances.

mod model;
mod repository;

pub use model::BalanceDB;
pub use repository::BalanceRepository;
pub(crate) use repository::{load_balance, save_balance};
