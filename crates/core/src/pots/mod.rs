//! Pots module - savings pots, their aggregation, and money movement.

mod pots_aggregation;
mod pots_model;
mod pots_service;
mod pots_traits;

pub use pots_aggregation::aggregate_pots;
pub use pots_model::{NewPot, Pot, PotAggregation, PotTransfer};
pub use pots_service::PotService;
pub use pots_traits::{PotRepositoryTrait, PotServiceTrait};
