use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use moneyboard_core::pots::{NewPot, Pot, PotAggregation, PotTransfer};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState, middleware::CurrentUser};

#[derive(Deserialize)]
struct PotFilter {
    name: Option<String>,
}

async fn list_pots(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(filter): Query<PotFilter>,
) -> ApiResult<Json<Vec<Pot>>> {
    let pots = state
        .pot_service
        .get_pots(&user.user_id, filter.name.as_deref())?;
    Ok(Json(pots))
}

async fn pot_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(filter): Query<PotFilter>,
) -> ApiResult<Json<PotAggregation>> {
    let summary = state
        .pot_service
        .get_pot_summary(&user.user_id, filter.name.as_deref())?;
    Ok(Json(summary))
}

async fn create_pot(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(pot): Json<NewPot>,
) -> ApiResult<(StatusCode, Json<Pot>)> {
    let created = state.pot_service.create_pot(&user.user_id, pot).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_pot(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(pot): Json<NewPot>,
) -> ApiResult<Json<Pot>> {
    let updated = state.pot_service.update_pot(&user.user_id, &id, pot).await?;
    Ok(Json(updated))
}

async fn delete_pot(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.pot_service.delete_pot(&user.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn deposit(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(transfer): Json<PotTransfer>,
) -> ApiResult<Json<Pot>> {
    let pot = state
        .pot_service
        .deposit(&user.user_id, &id, transfer)
        .await?;
    Ok(Json(pot))
}

async fn withdraw(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(transfer): Json<PotTransfer>,
) -> ApiResult<Json<Pot>> {
    let pot = state
        .pot_service
        .withdraw(&user.user_id, &id, transfer)
        .await?;
    Ok(Json(pot))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/pots", get(list_pots).post(create_pot))
        .route("/pots/summary", get(pot_summary))
        .route("/pots/{id}", put(update_pot).delete(delete_pot))
        .route("/pots/{id}/deposit", post(deposit))
        .route("/pots/{id}/withdraw", post(withdraw))
}
