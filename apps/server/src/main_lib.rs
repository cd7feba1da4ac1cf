use std::sync::Arc;

use rand::{rngs::OsRng, RngCore};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    auth::{decode_secret_key, AuthManager},
    config::Config,
    session::SessionCookieStore,
};
use moneyboard_core::{
    auth::{RefreshTokenService, RefreshTokenServiceTrait, SessionRenewer},
    balance::{BalanceService, BalanceServiceTrait},
    budgets::{BudgetService, BudgetServiceTrait},
    pots::{PotService, PotServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
    users::{UserService, UserServiceTrait},
};
use moneyboard_storage_sqlite::{
    balance::BalanceRepository,
    budgets::BudgetRepository,
    db::{self, write_actor},
    pots::PotRepository,
    refresh_tokens::RefreshTokenRepository,
    transactions::TransactionRepository,
    users::UserRepository,
    DbPool,
};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub refresh_token_service: Arc<dyn RefreshTokenServiceTrait>,
    pub session_renewer: Arc<SessionRenewer>,
    pub sessions: SessionCookieStore,
    pub auth: Arc<AuthManager>,
    pub balance_service: Arc<dyn BalanceServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub pot_service: Arc<dyn PotServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub pool: Arc<DbPool>,
}

pub fn init_tracing() {
    let log_format = std::env::var("MB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn session_secret(config: &Config) -> anyhow::Result<Vec<u8>> {
    match config.secret_key.as_deref() {
        Some(raw) => decode_secret_key(raw),
        None => {
            tracing::warn!(
                "MB_SECRET_KEY is not set; sessions will not survive a restart"
            );
            let mut secret = vec![0u8; 32];
            OsRng.fill_bytes(&mut secret);
            Ok(secret)
        }
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let sessions = SessionCookieStore::from_secret(&session_secret(config)?, config.cookie_secure)?;

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let user_service = Arc::new(UserService::new(user_repo));

    let refresh_token_repo = Arc::new(RefreshTokenRepository::new(pool.clone(), writer.clone()));
    let refresh_token_service: Arc<dyn RefreshTokenServiceTrait> =
        Arc::new(RefreshTokenService::new(refresh_token_repo));
    let session_renewer = Arc::new(SessionRenewer::new(refresh_token_service.clone()));

    let balance_repo = Arc::new(BalanceRepository::new(pool.clone()));
    let balance_service = Arc::new(BalanceService::new(balance_repo));

    let budget_repo = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let budget_service = Arc::new(BudgetService::new(budget_repo));

    let pot_repo = Arc::new(PotRepository::new(pool.clone(), writer.clone()));
    let pot_service = Arc::new(PotService::new(pot_repo));

    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let transaction_service = Arc::new(TransactionService::new(transaction_repo));

    Ok(Arc::new(AppState {
        user_service,
        refresh_token_service,
        session_renewer,
        sessions,
        auth: Arc::new(AuthManager::new()?),
        balance_service,
        budget_service,
        pot_service,
        transaction_service,
        pool,
    }))
}
