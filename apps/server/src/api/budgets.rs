use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use moneyboard_core::budgets::{Budget, BudgetAggregation, NewBudget};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState, middleware::CurrentUser};

#[derive(Deserialize)]
struct BudgetFilter {
    category: Option<String>,
}

async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(filter): Query<BudgetFilter>,
) -> ApiResult<Json<Vec<Budget>>> {
    let budgets = state
        .budget_service
        .get_budgets(&user.user_id, filter.category.as_deref())?;
    Ok(Json(budgets))
}

async fn budget_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(filter): Query<BudgetFilter>,
) -> ApiResult<Json<BudgetAggregation>> {
    let summary = state
        .budget_service
        .get_budget_summary(&user.user_id, filter.category.as_deref())?;
    Ok(Json(summary))
}

async fn create_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(budget): Json<NewBudget>,
) -> ApiResult<(StatusCode, Json<Budget>)> {
    let created = state
        .budget_service
        .create_budget(&user.user_id, budget)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(budget): Json<NewBudget>,
) -> ApiResult<Json<Budget>> {
    let updated = state
        .budget_service
        .update_budget(&user.user_id, &id, budget)
        .await?;
    Ok(Json(updated))
}

async fn delete_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.budget_service.delete_budget(&user.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/summary", get(budget_summary))
        .route("/budgets/{id}", put(update_budget).delete(delete_budget))
}
