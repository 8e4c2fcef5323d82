//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{Config, ENV_API_URL, ENV_DISCARD_STALE, ENV_TIMEOUT_SECS};
use crate::error::ConfigError;
use crate::state::StalePolicy;

/// Terminal front end for a library-management REST service.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "libdesk")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the REST API
    #[arg(long, env = ENV_API_URL, value_name = "URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = ENV_TIMEOUT_SECS, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Ignore responses that arrive after a newer request to the same slice
    #[arg(long, env = ENV_DISCARD_STALE, value_parser = clap::builder::FalseyValueParser::new())]
    pub discard_stale: bool,

    /// Write logs here instead of the user data directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Open the reset-password screen for a token from a reset email
    #[arg(long, value_name = "TOKEN")]
    pub reset_token: Option<String>,
}

impl Args {
    /// Overlay the parsed flags on `base`.
    pub fn apply(&self, mut base: Config) -> Result<Config, ConfigError> {
        if let Some(url) = &self.api_url {
            base = base.with_base_url(url.clone());
        }
        if let Some(secs) = self.timeout {
            base = base.with_timeout(Duration::from_secs(secs));
        }
        if self.discard_stale {
            base = base.with_stale_policy(StalePolicy::DiscardStale);
        }
        if let Some(path) = &self.log_file {
            base = base.with_log_file(path.clone());
        }
        base.validate()
    }

    /// Defaults, then the environment, then the flags.
    pub fn config(&self) -> Result<Config, ConfigError> {
        self.apply(Config::from_env()?)
    }
}
