use std::sync::Arc;

use axum::{extract::State, routing::get, Extension, Json, Router};
use chrono::Utc;
use moneyboard_core::{balance::Balance, transactions::TransactionSort};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    middleware::CurrentUser,
    models::{Overview, OVERVIEW_POT_COUNT, OVERVIEW_TRANSACTION_COUNT},
};

async fn get_overview(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Overview>> {
    let user_id = user.user_id.as_str();
    let balance = state.balance_service.get_balance(user_id)?;

    let mut pots = state.pot_service.get_pot_summary(user_id, None)?;
    pots.filtered_pots.truncate(OVERVIEW_POT_COUNT);

    let budgets = state.budget_service.get_budget_summary(user_id, None)?;
    let recent_transactions = state
        .transaction_service
        .get_recent_transactions(user_id, OVERVIEW_TRANSACTION_COUNT)?;
    let recurring_bills = state.transaction_service.get_recurring_bills(
        user_id,
        Utc::now(),
        None,
        TransactionSort::default(),
    )?;

    Ok(Json(Overview {
        balance,
        pots,
        budgets,
        recent_transactions,
        recurring_bills,
    }))
}

async fn get_balance(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Balance>> {
    Ok(Json(state.balance_service.get_balance(&user.user_id)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/overview", get(get_overview))
        .route("/balance", get(get_balance))
}
