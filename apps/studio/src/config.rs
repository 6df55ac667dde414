use std::time::Duration;

use anyhow::{Context, Result};

use crate::session::SessionSettings;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_api_url: String,
    pub backend_api_token: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub autosave_debounce: Duration,
    pub rollback_failed_reorder: bool,
    pub review_timeout: Duration,
    /// Sessions untouched this long are saved and closed. `None` keeps them open.
    pub session_idle_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            backend_api_url: require_env("BACKEND_API_URL")?,
            backend_api_token: std::env::var("BACKEND_API_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            autosave_debounce: Duration::from_millis(
                std::env::var("AUTOSAVE_DEBOUNCE_MS")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse::<u64>()
                    .context("AUTOSAVE_DEBOUNCE_MS must be a number of milliseconds")?,
            ),
            rollback_failed_reorder: std::env::var("ROLLBACK_FAILED_REORDER")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            review_timeout: Duration::from_secs(
                std::env::var("REVIEW_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse::<u64>()
                    .context("REVIEW_TIMEOUT_SECS must be a number of seconds")?,
            ),
            session_idle_timeout: match std::env::var("SESSION_IDLE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "1800".to_string())
                .parse::<u64>()
                .context("SESSION_IDLE_TIMEOUT_SECS must be a number of seconds")?
            {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        })
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            debounce: self.autosave_debounce,
            rollback_failed_reorder: self.rollback_failed_reorder,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
