mod balance_model;
mod balance_service;
mod balance_traits;

pub use balance_model::Balance;
pub use balance_service::BalanceService;
pub use balance_traits::{BalanceRepositoryTrait, BalanceServiceTrait};
