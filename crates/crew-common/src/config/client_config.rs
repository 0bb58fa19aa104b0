//! Client configuration structs
//!
//! Loads configuration from environment variables (with optional .env file).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Main client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub api_url: String,
    /// Per-request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Message polling cadence for the chat view
    #[serde(default)]
    pub poll: PollConfig,
    /// Where the session is persisted; memory-only when unset
    #[serde(default)]
    pub session_file: Option<PathBuf>,
    #[serde(default)]
    pub env: Environment,
}

/// Polling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub interval_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval_secs(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

// Default value functions
fn default_request_timeout_secs() -> u64 {
    10
}

fn default_poll_interval_secs() -> u64 {
    5
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = env::var("CREW_API_URL")
            .map_err(|_| ConfigError::MissingVar("CREW_API_URL"))?
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_url,
            request_timeout_secs: env::var("CREW_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_request_timeout_secs),
            poll: PollConfig {
                interval_secs: env::var("CREW_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_poll_interval_secs),
            },
            session_file: env::var("CREW_SESSION_FILE").ok().map(PathBuf::from),
            env: env::var("CREW_ENV")
                .ok()
                .and_then(|s| match s.to_lowercase().as_str() {
                    "production" => Some(Environment::Production),
                    "staging" => Some(Environment::Staging),
                    "development" => Some(Environment::Development),
                    _ => None,
                })
                .unwrap_or_default(),
        })
    }

    /// Construct a config pointing at the given base URL with defaults elsewhere
    #[must_use]
    pub fn for_url(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            request_timeout_secs: default_request_timeout_secs(),
            poll: PollConfig::default(),
            session_file: None,
            env: Environment::default(),
        }
    }

    /// Per-request timeout as a `Duration`
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Poll cadence as a `Duration`
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll.interval_secs)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
