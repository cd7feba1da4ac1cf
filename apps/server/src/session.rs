//! Encrypted session cookie and refresh-token cookie handling.
//!
//! The session cookie carries `{userId, expiresAt}` as JSON sealed with
//! ChaCha20-Poly1305 (random 12-byte nonce prepended, base64url). A cookie that
//! fails to decode or authenticate reads as "no session".

use axum::http::{header::COOKIE, HeaderMap};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Key, Nonce,
};
use hkdf::Hkdf;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use thiserror::Error;

use moneyboard_core::auth::Session;
use moneyboard_core::constants::{REFRESH_TOKEN_MAX_AGE_SECS, SESSION_MAX_AGE_SECS};

pub const SESSION_COOKIE_NAME: &str = "mb_session";
pub const REFRESH_COOKIE_NAME: &str = "mb_refresh";

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
const KEY_SALT: &[u8] = b"moneyboard-session-cookie";
const KEY_INFO: &[u8] = b"session-cookie-v1";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to derive the session cookie key")]
    KeyDerivation,
    #[error("Failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to encrypt session cookie")]
    Encrypt,
}

pub fn format_set_cookie(name: &str, value: &str, max_age: u64, secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!("{name}={value}; HttpOnly{secure_flag}; SameSite=Lax; Path=/; Max-Age={max_age}")
}

/// Value of the first cookie called `name` across all `Cookie` headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}

/// Raw refresh token presented with a request, if any.
pub fn refresh_token(headers: &HeaderMap) -> Option<&str> {
    cookie_value(headers, REFRESH_COOKIE_NAME).filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct SessionCookieStore {
    key: [u8; 32],
    secure: bool,
}

impl SessionCookieStore {
    /// Derives the cookie cipher key from the server secret with HKDF-SHA256.
    pub fn from_secret(secret: &[u8], secure: bool) -> Result<Self, SessionError> {
        let hkdf = Hkdf::<Sha256>::new(Some(KEY_SALT), secret);
        let mut key = [0u8; 32];
        hkdf.expand(KEY_INFO, &mut key)
            .map_err(|_| SessionError::KeyDerivation)?;
        Ok(Self { key, secure })
    }

    fn cipher(&self) -> ChaCha20Poly1305 {
        ChaCha20Poly1305::new(Key::from_slice(&self.key))
    }

    /// Session carried by the request's cookie, expired or not.
    pub fn read(&self, headers: &HeaderMap) -> Option<Session> {
        cookie_value(headers, SESSION_COOKIE_NAME).and_then(|value| self.decode(value))
    }

    pub fn decode(&self, value: &str) -> Option<Session> {
        let combined = URL_SAFE_NO_PAD.decode(value).ok()?;
        if combined.len() < NONCE_LEN + TAG_LEN + 1 {
            return None;
        }
        let (nonce, ciphertext) = combined.split_at(NONCE_LEN);
        let plaintext = self
            .cipher()
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .ok()?;
        serde_json::from_slice(&plaintext).ok()
    }

    pub fn encode(&self, session: &Session) -> Result<String, SessionError> {
        let plaintext = serde_json::to_vec(session)?;
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        let ciphertext = self
            .cipher()
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_ref())
            .map_err(|_| SessionError::Encrypt)?;

        let mut combined = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        combined.extend_from_slice(&nonce);
        combined.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(combined))
    }

    /// `Set-Cookie` value persisting `session` for the session window.
    pub fn commit(&self, session: &Session) -> Result<String, SessionError> {
        let value = self.encode(session)?;
        Ok(format_set_cookie(
            SESSION_COOKIE_NAME,
            &value,
            SESSION_MAX_AGE_SECS,
            self.secure,
        ))
    }

    /// `Set-Cookie` value that removes the session cookie.
    pub fn destroy(&self) -> String {
        format_set_cookie(SESSION_COOKIE_NAME, "", 0, self.secure)
    }

    pub fn refresh_cookie(&self, token: &str) -> String {
        format_set_cookie(
            REFRESH_COOKIE_NAME,
            token,
            REFRESH_TOKEN_MAX_AGE_SECS,
            self.secure,
        )
    }

    pub fn clear_refresh_cookie(&self) -> String {
        format_set_cookie(REFRESH_COOKIE_NAME, "", 0, self.secure)
    }
}
