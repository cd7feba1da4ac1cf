//! Request middleware: silent session renewal and session enforcement.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderValue, Method, StatusCode, Uri,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use moneyboard_core::{
    auth::{RenewalOutcome, RenewalRequest},
    errors::AuthError,
};

use crate::{error::ApiError, main_lib::AppState, session::refresh_token};

/// Identity of the signed-in user, inserted by [`require_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: String,
}

/// Renews an expired session on GET requests.
///
/// When the request carries an expired session and a refresh token that is
/// still active, the token is consumed, a replacement is issued and the client
/// is redirected back to the same URL with both cookies set. Every other case,
/// including internal failures, falls through to the downstream handler.
pub async fn session_refresh(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    // Built up front so a consumed refresh token always reaches the client.
    let Some(location) = renewal_location(request.uri()) else {
        return next.run(request).await;
    };
    let session = state.sessions.read(request.headers());
    let token = refresh_token(request.headers()).map(str::to_owned);
    let renewal = state
        .session_renewer
        .renew(RenewalRequest {
            session: session.as_ref(),
            refresh_token: token.as_deref(),
            now: Utc::now(),
        })
        .await;

    let Ok(outcome) = renewal else {
        return next.run(request).await;
    };

    match renewal_redirect(&state, location, &outcome) {
        Ok(response) => {
            tracing::info!("Renewed session for user {}", outcome.session.user_id);
            response
        }
        Err(e) => {
            tracing::warn!(
                "Refresh token of user {} was rotated but the renewal response failed, \
                 the client must sign in again: {}",
                outcome.session.user_id,
                e
            );
            next.run(request).await
        }
    }
}

/// Redirect target for a renewed request: the same path and query.
fn renewal_location(uri: &Uri) -> Option<HeaderValue> {
    let target = uri.path_and_query().map_or("/", |pq| pq.as_str());
    HeaderValue::from_str(target).ok()
}

fn renewal_redirect(
    state: &AppState,
    location: HeaderValue,
    outcome: &RenewalOutcome,
) -> anyhow::Result<Response> {
    let session_cookie = state.sessions.commit(&outcome.session)?;
    let refresh_cookie = state
        .sessions
        .refresh_cookie(&outcome.refresh_token.token);

    let mut response = StatusCode::FOUND.into_response();
    let headers = response.headers_mut();
    headers.insert(LOCATION, location);
    headers.append(SET_COOKIE, HeaderValue::from_str(&session_cookie)?);
    headers.append(SET_COOKIE, HeaderValue::from_str(&refresh_cookie)?);
    Ok(response)
}

/// Rejects requests without a live session and exposes the user as [`CurrentUser`].
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = state
        .sessions
        .read(request.headers())
        .filter(|s| !s.is_expired(Utc::now()))
        .ok_or(AuthError::Unauthenticated)?;

    request.extensions_mut().insert(CurrentUser {
        user_id: session.user_id,
    });
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renewal_location_keeps_path_and_query() {
        let uri: Uri = "/api/v1/transactions?page=2&sort=a-z".parse().unwrap();
        assert_eq!(
            renewal_location(&uri).unwrap(),
            "/api/v1/transactions?page=2&sort=a-z"
        );

        let uri: Uri = "http://localhost:8080".parse().unwrap();
        assert_eq!(renewal_location(&uri).unwrap(), "/");
    }
}
