//! Builds a runtime [`Config`] by merging defaults, an optional TOML file,
//! environment variables, and programmatic overrides, in that order.

use crate::core::config::{loading, validation, Config};
use crate::core::error::{AppError, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub(crate) const API_USERNAME_ENV: &str = "EMAIL_WARDEN_API_USERNAME";
pub(crate) const API_PASSWORD_ENV: &str = "EMAIL_WARDEN_API_PASSWORD";

/// Fluent builder for [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_file_path: Option<PathBuf>,
    skip_file_discovery: bool,
    skip_env: bool,

    api_username: Option<String>,
    api_password: Option<String>,
    api_base_url: Option<String>,
    quality: Option<String>,
    request_timeout: Option<Duration>,
    max_poll_attempts: Option<u32>,
    poll_interval: Option<Duration>,
    cache_ttl_hours: Option<u64>,
    extra_reserved_domains: Option<Vec<String>>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from the given TOML file instead of the discovered one.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file_path = Some(path.into());
        self
    }

    /// Disables config file discovery entirely (tests, embedded use).
    pub fn without_config_file(mut self) -> Self {
        self.skip_file_discovery = true;
        self
    }

    /// Disables environment variable lookups (tests).
    pub fn without_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    pub fn api_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.api_username = Some(username.into());
        self.api_password = Some(password.into());
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    pub fn quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn max_poll_attempts(mut self, attempts: u32) -> Self {
        self.max_poll_attempts = Some(attempts);
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn cache_ttl_hours(mut self, hours: u64) -> Self {
        self.cache_ttl_hours = Some(hours);
        self
    }

    pub fn extra_reserved_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_reserved_domains = Some(domains.into_iter().map(Into::into).collect());
        self
    }

    /// Merges all sources and validates the final configuration.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        // Layer 1: config file.
        if !self.skip_file_discovery || self.config_file_path.is_some() {
            if let Some(path) = loading::resolve_config_path(self.config_file_path.as_deref())? {
                let file = loading::load_config_file(&path)?;
                apply_file(&mut config, &file)?;
                config.loaded_config_path = Some(path.display().to_string());
            }
        }

        // Layer 2: environment.
        if !self.skip_env {
            if let Ok(username) = std::env::var(API_USERNAME_ENV) {
                if !username.is_empty() {
                    config.api_username = Some(username);
                }
            }
            if let Ok(password) = std::env::var(API_PASSWORD_ENV) {
                if !password.is_empty() {
                    config.api_password = Some(password);
                }
            }
        }

        // Layer 3: programmatic overrides.
        if let Some(username) = self.api_username {
            config.api_username = Some(username);
        }
        if let Some(password) = self.api_password {
            config.api_password = Some(password);
        }
        if let Some(url) = self.api_base_url {
            config.api_base_url = parse_base_url(&url)?;
        }
        if let Some(quality) = self.quality {
            config.quality = quality;
        }
        if let Some(timeout) = self.request_timeout {
            config.request_timeout = timeout;
        }
        if let Some(attempts) = self.max_poll_attempts {
            config.max_poll_attempts = attempts;
        }
        if let Some(interval) = self.poll_interval {
            config.poll_interval = interval;
        }
        if let Some(hours) = self.cache_ttl_hours {
            config.cache_ttl = Duration::from_secs(hours * 3600);
        }
        if let Some(domains) = self.extra_reserved_domains {
            config.extra_reserved_domains =
                domains.iter().map(|d| d.trim().to_lowercase()).collect();
        }

        validation::validate(&config)?;
        Ok(config)
    }
}

fn apply_file(config: &mut Config, file: &crate::core::config::ConfigFile) -> Result<()> {
    if let Some(ref username) = file.remote.api_username {
        config.api_username = Some(username.clone());
    }
    if let Some(ref password) = file.remote.api_password {
        config.api_password = Some(password.clone());
    }
    if let Some(ref url) = file.remote.base_url {
        config.api_base_url = parse_base_url(url)?;
    }
    if let Some(ref quality) = file.remote.quality {
        config.quality = quality.clone();
    }
    if let Some(secs) = file.remote.request_timeout {
        config.request_timeout = Duration::from_secs(secs);
    }
    if let Some(attempts) = file.remote.max_poll_attempts {
        config.max_poll_attempts = attempts;
    }
    if let Some(ms) = file.remote.poll_interval_ms {
        config.poll_interval = Duration::from_millis(ms);
    }
    if let Some(hours) = file.cache.ttl_hours {
        config.cache_ttl = Duration::from_secs(hours * 3600);
    }
    if let Some(ref domains) = file.rules.extra_reserved_domains {
        config.extra_reserved_domains =
            domains.iter().map(|d| d.trim().to_lowercase()).collect();
    }
    Ok(())
}

fn parse_base_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| AppError::Config(format!("Invalid API base URL '{}': {}", raw, e)))
}
