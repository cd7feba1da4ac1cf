use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    /// Base64 or 32-character key the session cookie cipher is derived from.
    pub secret_key: Option<String>,
    /// Adds `Secure` to every cookie; enable behind HTTPS.
    pub cookie_secure: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("MB_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid MB_LISTEN_ADDR")?;
        let db_path = std::env::var("MB_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("MB_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("MB_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let static_dir = std::env::var("MB_STATIC_DIR").unwrap_or_else(|_| "dist".into());
        let secret_key = std::env::var("MB_SECRET_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let cookie_secure = std::env::var("MB_COOKIE_SECURE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir,
            secret_key,
            cookie_secure,
        })
    }
}
