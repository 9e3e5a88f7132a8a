//! Client configuration
//!
//! Defaults are compiled in. Each value can be overridden by a named
//! variable, looked up from the process environment natively or from
//! build-time variables in the browser.

use log::LevelFilter;

pub const DEFAULT_BASE_URL: &str = "https://stock-management-api.vercel.app/api";
pub const DEFAULT_TOKEN_KEY: &str = "token";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

pub const ENV_BASE_URL: &str = "STOCKDESK_API_URL";
pub const ENV_TOKEN_KEY: &str = "STOCKDESK_TOKEN_KEY";
pub const ENV_LOG_LEVEL: &str = "STOCKDESK_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root; every endpoint path is appended to it.
    pub base_url: String,
    /// Storage key the bearer token is persisted under.
    pub token_key: String,
    pub log_level: LevelFilter,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl ClientConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source, falling back to the defaults
    /// for missing, blank or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        Self {
            base_url: read(ENV_BASE_URL).unwrap_or(defaults.base_url),
            token_key: read(ENV_TOKEN_KEY).unwrap_or(defaults.token_key),
            log_level: read(ENV_LOG_LEVEL)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_level),
        }
    }
}
