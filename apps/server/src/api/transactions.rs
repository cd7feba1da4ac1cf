use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use moneyboard_core::transactions::{
    NewTransaction, RecurringBillsSummary, Transaction, TransactionPage, TransactionQuery,
    TransactionSort,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState, middleware::CurrentUser};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionParams {
    search: Option<String>,
    category: Option<String>,
    sort: Option<String>,
    page: Option<usize>,
    page_size: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecurringBillParams {
    search: Option<String>,
    sort: Option<String>,
    as_of: Option<DateTime<Utc>>,
}

fn parse_sort(sort: Option<&str>) -> ApiResult<Option<TransactionSort>> {
    Ok(sort.map(str::parse::<TransactionSort>).transpose()?)
}

async fn search_transactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<TransactionParams>,
) -> ApiResult<Json<TransactionPage>> {
    let query = TransactionQuery {
        sort: parse_sort(params.sort.as_deref())?,
        search: params.search,
        category: params.category,
        page: params.page,
        page_size: params.page_size,
    };
    let page = state
        .transaction_service
        .search_transactions(&user.user_id, &query)?;
    Ok(Json(page))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(transaction): Json<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let created = state
        .transaction_service
        .create_transaction(&user.user_id, transaction)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_categories(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.transaction_service.get_categories(&user.user_id)?))
}

async fn recurring_bills(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<RecurringBillParams>,
) -> ApiResult<Json<RecurringBillsSummary>> {
    let sort = parse_sort(params.sort.as_deref())?.unwrap_or_default();
    let summary = state.transaction_service.get_recurring_bills(
        &user.user_id,
        params.as_of.unwrap_or_else(Utc::now),
        params.search.as_deref(),
        sort,
    )?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(search_transactions).post(create_transaction),
        )
        .route("/transactions/categories", get(list_categories))
        .route("/recurring-bills", get(recurring_bills))
}
