use std::time::Duration;

use bc_cloudflare_api::DEFAULT_BASE_URL;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("CLOUDFLARE_API_TOKEN is not set")]
    MissingToken,
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
}

#[derive(Clone)]
pub struct SessionConfig {
    /// API token, or the global API key when `email` is set
    pub api_token: String,

    /// Account email; switches authentication to global-key headers
    pub email: Option<String>,

    pub base_url: String,

    /// Per-request timeout applied to the shared HTTP client
    pub timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            email: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("api_token", &"<redacted>")
            .field("email", &self.email)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SessionConfig {
    pub fn new(api_token: &str) -> Self {
        Self {
            api_token: api_token.to_string(),
            ..Self::default()
        }
    }

    /// Build a config from `CLOUDFLARE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(token) = lookup("CLOUDFLARE_API_TOKEN") {
            config.api_token = token.trim().to_string();
        }

        if let Some(email) = lookup("CLOUDFLARE_EMAIL") {
            let email = email.trim();
            if !email.is_empty() {
                config.email = Some(email.to_string());
            }
        }

        if let Some(base_url) = lookup("CLOUDFLARE_API_BASE_URL") {
            config.base_url = base_url.trim().to_string();
        }

        if let Some(timeout_str) = lookup("CLOUDFLARE_TIMEOUT_SECS") {
            let timeout_secs = timeout_str
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(timeout_str.clone()))?;
            config.timeout = Duration::from_secs(timeout_secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "Timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
