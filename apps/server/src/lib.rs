pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod session;
mod main_lib;

pub use main_lib::{build_state, init_tracing, AppState};
