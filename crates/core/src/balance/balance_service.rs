use std::sync::Arc;

use super::balance_model::Balance;
use super::balance_traits::{BalanceRepositoryTrait, BalanceServiceTrait};
use crate::errors::Result;

pub struct BalanceService {
    repository: Arc<dyn BalanceRepositoryTrait>,
}

impl BalanceService {
    pub fn new(repository: Arc<dyn BalanceRepositoryTrait>) -> Self {
        BalanceService { repository }
    }
}

impl BalanceServiceTrait for BalanceService {
    fn get_balance(&self, user_id: &str) -> Result<Balance> {
        Ok(self.repository.get_balance(user_id)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct FixedBalance(Option<Balance>);

    impl BalanceRepositoryTrait for FixedBalance {
        fn get_balance(&self, _user_id: &str) -> Result<Option<Balance>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_missing_balance_is_zero() {
        let service = BalanceService::new(Arc::new(FixedBalance(None)));
        assert_eq!(service.get_balance("u").unwrap(), Balance::default());
    }

    #[test]
    fn test_returns_stored_balance() {
        let stored = Balance {
            current: dec!(4836.00),
            income: dec!(3814.25),
            expenses: dec!(1700.50),
        };
        let service = BalanceService::new(Arc::new(FixedBalance(Some(stored.clone()))));
        assert_eq!(service.get_balance("u").unwrap(), stored);
    }
}
