use crate::errors::Result;
use crate::pots::pots_model::{NewPot, Pot, PotAggregation, PotTransfer};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait for pot repository operations
#[async_trait]
pub trait PotRepositoryTrait: Send + Sync {
    fn list_pots(&self, user_id: &str) -> Result<Vec<Pot>>;
    fn get_pot(&self, user_id: &str, pot_id: &str) -> Result<Option<Pot>>;
    async fn create_pot(&self, user_id: &str, new_pot: NewPot) -> Result<Pot>;
    async fn update_pot(&self, user_id: &str, pot_id: &str, update: NewPot) -> Result<Pot>;
    /// Deletes the pot and returns its saved total to the balance.
    async fn delete_pot(&self, user_id: &str, pot_id: &str) -> Result<usize>;
    /// Moves `delta` from the balance into the pot (negative withdraws).
    /// Fails with `InsufficientFunds` when either side would go negative.
    async fn move_money(&self, user_id: &str, pot_id: &str, delta: Decimal) -> Result<Pot>;
}

/// Trait for pot service operations
#[async_trait]
pub trait PotServiceTrait: Send + Sync {
    fn get_pots(&self, user_id: &str, name: Option<&str>) -> Result<Vec<Pot>>;
    fn get_pot_summary(&self, user_id: &str, name: Option<&str>) -> Result<PotAggregation>;
    async fn create_pot(&self, user_id: &str, new_pot: NewPot) -> Result<Pot>;
    async fn update_pot(&self, user_id: &str, pot_id: &str, update: NewPot) -> Result<Pot>;
    async fn delete_pot(&self, user_id: &str, pot_id: &str) -> Result<()>;
    async fn deposit(&self, user_id: &str, pot_id: &str, transfer: PotTransfer) -> Result<Pot>;
    async fn withdraw(&self, user_id: &str, pot_id: &str, transfer: PotTransfer) -> Result<Pot>;
}
