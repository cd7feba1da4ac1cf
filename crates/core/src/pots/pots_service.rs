use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::pots_aggregation::aggregate_pots;
use super::pots_model::{NewPot, Pot, PotAggregation, PotTransfer};
use super::pots_traits::{PotRepositoryTrait, PotServiceTrait};
use crate::errors::{Error, Result};

pub struct PotService {
    repository: Arc<dyn PotRepositoryTrait>,
}

impl PotService {
    pub fn new(repository: Arc<dyn PotRepositoryTrait>) -> Self {
        PotService { repository }
    }

    fn normalize(mut pot: NewPot) -> Result<NewPot> {
        pot.validate()?;
        pot.name = pot.name.trim().to_string();
        pot.theme = pot.theme.trim().to_string();
        Ok(pot)
    }
}

#[async_trait]
impl PotServiceTrait for PotService {
    fn get_pots(&self, user_id: &str, name: Option<&str>) -> Result<Vec<Pot>> {
        let pots = self.repository.list_pots(user_id)?;
        Ok(aggregate_pots(Some(&pots), name).filtered_pots)
    }

    fn get_pot_summary(&self, user_id: &str, name: Option<&str>) -> Result<PotAggregation> {
        let pots = self.repository.list_pots(user_id)?;
        Ok(aggregate_pots(Some(&pots), name))
    }

    async fn create_pot(&self, user_id: &str, new_pot: NewPot) -> Result<Pot> {
        let new_pot = Self::normalize(new_pot)?;
        let pot = self.repository.create_pot(user_id, new_pot).await?;
        debug!("Created pot {} ({})", pot.id, pot.name);
        Ok(pot)
    }

    async fn update_pot(&self, user_id: &str, pot_id: &str, update: NewPot) -> Result<Pot> {
        let update = Self::normalize(update)?;
        if self.repository.get_pot(user_id, pot_id)?.is_none() {
            return Err(Error::NotFound(format!("Pot {pot_id}")));
        }
        self.repository.update_pot(user_id, pot_id, update).await
    }

    async fn delete_pot(&self, user_id: &str, pot_id: &str) -> Result<()> {
        let deleted = self.repository.delete_pot(user_id, pot_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Pot {pot_id}")));
        }
        Ok(())
    }

    async fn deposit(&self, user_id: &str, pot_id: &str, transfer: PotTransfer) -> Result<Pot> {
        transfer.validate()?;
        self.repository
            .move_money(user_id, pot_id, transfer.amount)
            .await
    }

    async fn withdraw(&self, user_id: &str, pot_id: &str, transfer: PotTransfer) -> Result<Pot> {
        transfer.validate()?;
        self.repository
            .move_money(user_id, pot_id, -transfer.amount)
            .await
    }
}
