//! Defines the core runtime `Config` struct, its defaults, and related utilities.
//! Submodules handle loading, building, and validation.

pub(crate) mod builder;
pub(crate) mod file;
pub(crate) mod loading;
pub(crate) mod validation;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Default endpoint of the remote verification service.
pub(crate) const DEFAULT_API_BASE_URL: &str = "https://api.verimail.io/v1";

/// Runtime configuration settings used by the email-warden core logic.
///
/// Credentials being absent selects the null (passthrough) client when the
/// validation chain is built; every other knob has a working default.
#[derive(Clone)]
pub struct Config {
    pub api_username: Option<String>,
    pub api_password: Option<String>,
    pub api_base_url: Url,

    /// Provider-side quality tier, trading thoroughness for cost/latency.
    pub quality: String,
    pub request_timeout: Duration,
    pub max_poll_attempts: u32,
    pub poll_interval: Duration,

    pub cache_ttl: Duration,

    /// Operator-curated domains rejected in addition to the built-in
    /// reserved set (test domains, known spam sources).
    pub extra_reserved_domains: HashSet<String>,

    pub loaded_config_path: Option<String>,
}

impl Config {
    fn build_default() -> Self {
        let api_base_url = Url::parse(DEFAULT_API_BASE_URL)
            .expect("Default API base URL failed to parse. This is a bug.");

        Config {
            api_username: None,
            api_password: None,
            api_base_url,
            quality: "Standard".to_string(),
            request_timeout: Duration::from_secs(30),
            max_poll_attempts: 10,
            poll_interval: Duration::from_secs(1),
            cache_ttl: Duration::from_secs(24 * 3600),
            extra_reserved_domains: HashSet::new(),
            loaded_config_path: None,
        }
    }

    /// True when both halves of the remote credentials are present.
    pub fn has_remote_credentials(&self) -> bool {
        matches!(
            (&self.api_username, &self.api_password),
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty()
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::build_default()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_username", &self.api_username)
            .field("api_password", &self.api_password.as_ref().map(|_| "***"))
            .field("api_base_url", &self.api_base_url.as_str())
            .field("quality", &self.quality)
            .field("request_timeout", &self.request_timeout)
            .field("max_poll_attempts", &self.max_poll_attempts)
            .field("poll_interval", &self.poll_interval)
            .field("cache_ttl", &self.cache_ttl)
            .field(
                "extra_reserved_domains_count",
                &self.extra_reserved_domains.len(),
            )
            .field("loaded_config_path", &self.loaded_config_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.quality, "Standard");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_poll_attempts, 10);
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.cache_ttl, Duration::from_secs(86_400));
        assert!(!config.has_remote_credentials());
    }

    #[test]
    fn partial_credentials_do_not_count() {
        let mut config = Config::default();
        config.api_username = Some("user".to_string());
        assert!(!config.has_remote_credentials());
        config.api_password = Some(String::new());
        assert!(!config.has_remote_credentials());
        config.api_password = Some("secret".to_string());
        assert!(config.has_remote_credentials());
    }

    #[test]
    fn debug_redacts_password() {
        let mut config = Config::default();
        config.api_password = Some("secret".to_string());
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret"));
    }
}
