//! Auth module - sessions, refresh tokens and silent session renewal.

mod auth_model;
mod auth_traits;
mod refresh_token_service;
mod session_renewer;

pub use auth_model::{
    IssuedRefreshToken, NewRefreshToken, RefreshToken, Session, TokenRotation,
};
pub use auth_traits::{RefreshTokenRepositoryTrait, RefreshTokenServiceTrait};
pub use refresh_token_service::{generate_token, hash_token, RefreshTokenService};
pub use session_renewer::{RenewalOutcome, RenewalRequest, SessionRenewer, Unrenewed};
