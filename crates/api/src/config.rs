use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use decideroom_core::planner::ModelSelection;
use decideroom_gemini::gateway::DEFAULT_BASE_URL;
use decideroom_gemini::retry::RetryConfig;
use decideroom_gemini::GeminiConfig;

/// Local front-end dev servers allowed by default.
const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:5173,http://127.0.0.1:5173,http://localhost:3000";

/// Errors raised while reading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// Everything except the Gemini API key has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Whole-request timeout in seconds (default: `120`).
    pub request_timeout_secs: u64,
    /// Gemini connection, timeout and retry settings.
    pub gemini: GeminiConfig,
    /// Model variants for the selection and arrangement calls.
    pub models: ModelSelection,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                                             |
    /// |----------------------------|-----------------------------------------------------|
    /// | `HOST`                     | `0.0.0.0`                                           |
    /// | `PORT`                     | `8000`                                              |
    /// | `CORS_ORIGINS`             | `http://localhost:5173,http://127.0.0.1:5173,http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`     | `120`                                               |
    /// | `GEMINI_API_KEY`           | required                                            |
    /// | `GEMINI_BASE_URL`          | `https://generativelanguage.googleapis.com/v1beta`  |
    /// | `GEMINI_SELECTION_MODEL`   | `gemini-2.0-flash`                                  |
    /// | `GEMINI_ARRANGEMENT_MODEL` | `gemini-2.5-flash`                                  |
    /// | `GEMINI_TIMEOUT_SECS`      | `30`                                                |
    /// | `GEMINI_MAX_ATTEMPTS`      | `3`                                                 |
    /// | `GEMINI_RETRY_BASE_MS`     | `500`                                               |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_key = lookup("GEMINI_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let retry_base_ms: u64 = parse("GEMINI_RETRY_BASE_MS", var("GEMINI_RETRY_BASE_MS", "500"))?;
        let retry = RetryConfig {
            max_attempts: parse("GEMINI_MAX_ATTEMPTS", var("GEMINI_MAX_ATTEMPTS", "3"))?,
            initial_delay: Duration::from_millis(retry_base_ms),
            ..RetryConfig::default()
        };
        if retry.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                key: "GEMINI_MAX_ATTEMPTS",
                value: "0".into(),
            });
        }

        let gemini = GeminiConfig {
            api_key,
            base_url: var("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            timeout: Duration::from_secs(parse(
                "GEMINI_TIMEOUT_SECS",
                var("GEMINI_TIMEOUT_SECS", "30"),
            )?),
            retry,
        };

        Ok(Self {
            host: parse("HOST", var("HOST", "0.0.0.0"))?,
            port: parse("PORT", var("PORT", "8000"))?,
            cors_origins,
            request_timeout_secs: parse("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS", "120"))?,
            gemini,
            models: ModelSelection {
                selection: var("GEMINI_SELECTION_MODEL", "gemini-2.0-flash"),
                arrangement: var("GEMINI_ARRANGEMENT_MODEL", "gemini-2.5-flash"),
            },
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
