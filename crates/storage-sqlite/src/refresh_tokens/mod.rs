//! SQLite storage implementation for refresh tokens.

mod model;
mod repository;

pub use model::RefreshTokenDB;
pub use repository::RefreshTokenRepository;
