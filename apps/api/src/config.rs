use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com";

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Optional so the upload endpoint keeps working without credentials;
    /// `/api/generate` answers 500 when it is missing.
    pub anthropic_api_key: Option<String>,
    pub anthropic_api_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Shared wall-clock budget for the three report calls together.
    pub generate_timeout: Duration,
    pub llm_max_retries: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            anthropic_api_url: optional_env("ANTHROPIC_API_URL")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_API_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            generate_timeout: Duration::from_secs(
                std::env::var("GENERATE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "25".to_string())
                    .parse::<u64>()
                    .context("GENERATE_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            llm_max_retries: std::env::var("LLM_MAX_RETRIES")
                .unwrap_or_else(|_| "1".to_string())
                .parse::<u32>()
                .context("LLM_MAX_RETRIES must be a non-negative integer")?,
        })
    }
}

/// Treats unset and blank variables the same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
