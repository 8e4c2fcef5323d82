//! Runtime configuration.
//!
//! Precedence, lowest first: built-in defaults, environment variables, CLI
//! flags. The environment is read through a lookup function so tests can
//! supply their own.

use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_BASE_URL;
use crate::error::ConfigError;
use crate::feedback::DEFAULT_TOAST_TTL;
use crate::state::StalePolicy;

pub const ENV_API_URL: &str = "LIBDESK_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "LIBDESK_TIMEOUT_SECS";
pub const ENV_DISCARD_STALE: &str = "LIBDESK_DISCARD_STALE";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
    pub toast_ttl: Duration,
    pub stale_policy: StalePolicy,
    /// Log file; `None` means the default under the user data directory.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            toast_ttl: DEFAULT_TOAST_TTL,
            stale_policy: StalePolicy::AcceptAll,
            log_file: None,
        }
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            key,
            value: value.to_string(),
        }),
    }
}

impl Config {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Overlay values found by `lookup`.
    pub fn with_env(
        mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(ENV_API_URL) {
            self.base_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidEnv {
                    key: ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup(ENV_DISCARD_STALE) {
            if parse_bool(ENV_DISCARD_STALE, &raw)? {
                self.stale_policy = StalePolicy::DiscardStale;
            }
        }
        self.validate()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_toast_ttl(mut self, ttl: Duration) -> Self {
        self.toast_ttl = ttl;
        self
    }

    pub fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
        self.stale_policy = policy;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Check the base URL and normalize its trailing slash.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        let url = self.base_url.trim().trim_end_matches('/').to_string();
        let has_host = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(ConfigError::InvalidBaseUrl(self.base_url));
        }
        self.base_url = url;
        Ok(self)
    }

    /// Log file path, falling back to `<data dir>/libdesk/libdesk.log`.
    pub fn log_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join("libdesk").join("libdesk.log"))
                .ok_or(ConfigError::NoDataDir),
        }
    }
}
