use std::sync::Arc;

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher,
        PasswordVerifier, SaltString,
    },
    Argon2,
};
use axum::{
    extract::State,
    http::{
        header::{SET_COOKIE, USER_AGENT},
        HeaderMap, StatusCode,
    },
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
    Extension, Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use moneyboard_core::{
    auth::Session,
    errors::{AuthError, ValidationError},
    users::User,
};
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    middleware::CurrentUser,
    session::refresh_token,
};

const MIN_PASSWORD_LEN: usize = 8;
const MAX_DEVICE_INFO_LEN: usize = 255;

/// Password hashing and verification.
pub struct AuthManager {
    argon2: Argon2<'static>,
    /// Verified against when the email is unknown so both failures cost the same.
    dummy_hash: String,
}

impl AuthManager {
    pub fn new() -> anyhow::Result<Self> {
        let argon2 = Argon2::default();
        let salt = SaltString::generate(&mut OsRng);
        let dummy_hash = argon2
            .hash_password(b"moneyboard-dummy-password", &salt)
            .map_err(|e| anyhow::anyhow!("Failed to prepare password hasher: {e}"))?
            .to_string();
        Ok(Self { argon2, dummy_hash })
    }

    pub fn hash_password(&self, password: &str) -> ApiResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ApiError::Internal(format!("Failed to hash password: {e}")))
    }

    /// Checks `candidate` against a stored PHC string, or against the dummy
    /// hash when no account matched.
    pub fn verify_password(&self, candidate: &str, stored: Option<&str>) -> ApiResult<()> {
        let phc = stored.unwrap_or(&self.dummy_hash);
        let parsed = PasswordHash::new(phc)
            .map_err(|e| ApiError::Internal(format!("Invalid stored password hash: {e}")))?;
        self.argon2
            .verify_password(candidate.as_bytes(), &parsed)
            .map_err(|err| match err {
                PasswordHashError::Password => ApiError::from(AuthError::InvalidCredentials),
                other => ApiError::Internal(format!("Password verification failed: {other}")),
            })?;
        if stored.is_none() {
            return Err(AuthError::InvalidCredentials.into());
        }
        Ok(())
    }
}

pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("Secret key cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("Secret key must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("Secret key must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn device_info(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|ua| !ua.is_empty())
        .map(|ua| ua.chars().take(MAX_DEVICE_INFO_LEN).collect())
}

/// Starts a session for `user_id` and returns the two `Set-Cookie` values.
async fn start_session(
    state: &AppState,
    user_id: &str,
    headers: &HeaderMap,
) -> ApiResult<[(axum::http::HeaderName, String); 2]> {
    let now = Utc::now();
    let issued = state
        .refresh_token_service
        .issue(user_id, device_info(headers), now)
        .await?;
    let session_cookie = state
        .sessions
        .commit(&Session::start(user_id, now))
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok([
        (SET_COOKIE, session_cookie),
        (SET_COOKIE, state.sessions.refresh_cookie(&issued.token)),
    ])
}

async fn signup(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ))
        .into());
    }
    let password_hash = state.auth.hash_password(&payload.password)?;
    let user = state
        .user_service
        .register(&payload.email, &payload.name, password_hash)
        .await?;
    let cookies = start_session(&state, &user.id, &headers).await?;
    Ok((StatusCode::CREATED, AppendHeaders(cookies), Json(user)))
}

async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let credentials = state.user_service.find_credentials(&payload.email)?;
    state.auth.verify_password(
        &payload.password,
        credentials.as_ref().map(|c| c.password_hash.as_str()),
    )?;
    let user = credentials
        .map(|c| c.user)
        .ok_or(AuthError::InvalidCredentials)?;
    let cookies = start_session(&state, &user.id, &headers).await?;
    tracing::info!("User {} signed in", user.id);
    Ok((AppendHeaders(cookies), Json(user)))
}

async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    if let Some(token) = refresh_token(&headers) {
        if state.refresh_token_service.revoke(token).await? {
            tracing::debug!("Revoked refresh token on logout");
        }
    }
    Ok((
        StatusCode::NO_CONTENT,
        AppendHeaders([
            (SET_COOKIE, state.sessions.destroy()),
            (SET_COOKIE, state.sessions.clear_refresh_cookie()),
        ]),
    ))
}

async fn me(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.user_service.get_user(&current.user_id)?))
}

/// Routes that work without a session.
pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/me", get(me))
}
