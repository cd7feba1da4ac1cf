use crate::balance::balance_model::Balance;
use crate::errors::Result;

/// Trait for balance repository operations
pub trait BalanceRepositoryTrait: Send + Sync {
    /// `None` when the user has no balance row yet.
    fn get_balance(&self, user_id: &str) -> Result<Option<Balance>>;
}

/// Trait for balance service operations
pub trait BalanceServiceTrait: Send + Sync {
    fn get_balance(&self, user_id: &str) -> Result<Balance>;
}
