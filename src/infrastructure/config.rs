//! Application configuration

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

use crate::application::services::CreationTimings;

const ENV_PREFIX: &str = "STANDSHEET";
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Application configuration loaded from defaults and `STANDSHEET_*` variables
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Character backend base URL
    pub api_base_url: String,
    /// Token for the backend's `Authorization: Token ...` header
    #[serde(default)]
    pub auth_token: Option<String>,
    pub request_timeout_secs: u64,
    /// Delay before leaving the success screen
    pub redirect_delay_ms: u64,
    /// Delay before sending the user to log in again
    pub reauth_redirect_delay_ms: u64,
    pub search_debounce_ms: u64,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn load() -> Result<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn from_environment(environment: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("request_timeout_secs", 10)?
            .set_default("redirect_delay_ms", 5000)?
            .set_default("reauth_redirect_delay_ms", 2000)?
            .set_default("search_debounce_ms", 300)?
            .add_source(environment.try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .context("Invalid configuration value")?;
        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        if config.auth_token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            config.auth_token = None;
        }
        Ok(config)
    }

    pub fn credentials(&self) -> ApiCredentials {
        match &self.auth_token {
            Some(token) => ApiCredentials::token(token.clone()),
            None => ApiCredentials::anonymous(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn creation_timings(&self) -> CreationTimings {
        CreationTimings {
            redirect_delay: Duration::from_millis(self.redirect_delay_ms),
            reauth_redirect_delay: Duration::from_millis(self.reauth_redirect_delay_ms),
        }
    }
}

/// Credentials handed to the REST client
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiCredentials {
    token: Option<String>,
}

impl ApiCredentials {
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.token.is_none()
    }

    /// Value for the `Authorization` header, if any
    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Token {token}"))
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_some() { "<redacted>" } else { "<none>" };
        f.debug_struct("ApiCredentials").field("token", &token).finish()
    }
}
