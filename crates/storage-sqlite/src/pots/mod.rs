//! SQLite storage implementation for pots.

mod model;
mod repository;

pub use model::PotDB;
pub use repository::PotRepository;
