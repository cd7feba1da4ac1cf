use std::sync::Arc;

use axum::{http::HeaderValue, middleware, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    auth,
    config::Config,
    main_lib::AppState,
    middleware::{require_session, session_refresh},
};

mod budgets;
mod health;
mod overview;
mod pots;
mod transactions;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {}", o);
                    None
                }
            })
            .collect::<Vec<HeaderValue>>();
        CorsLayer::new().allow_origin(origins)
    };

    let protected = Router::new()
        .merge(auth::router())
        .merge(overview::router())
        .merge(budgets::router())
        .merge(pots::router())
        .merge(transactions::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let api = Router::new()
        .merge(health::router())
        .merge(auth::public_router())
        .merge(protected);

    Router::new()
        .nest("/api/v1", api)
        .layer(middleware::from_fn_with_state(state.clone(), session_refresh))
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
