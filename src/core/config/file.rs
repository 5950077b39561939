//! Defines the structure mirroring the TOML configuration file format.

use serde::Deserialize;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub(crate) remote: RemoteConfig,
    #[serde(default)]
    pub(crate) cache: CacheConfig,
    #[serde(default)]
    pub(crate) rules: RulesConfig,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct RemoteConfig {
    pub(crate) api_username: Option<String>,
    pub(crate) api_password: Option<String>,
    pub(crate) base_url: Option<String>,
    pub(crate) quality: Option<String>,
    /// Seconds.
    pub(crate) request_timeout: Option<u64>,
    pub(crate) max_poll_attempts: Option<u32>,
    /// Milliseconds.
    pub(crate) poll_interval_ms: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct CacheConfig {
    pub(crate) ttl_hours: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct RulesConfig {
    pub(crate) extra_reserved_domains: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let raw = r#"
            [remote]
            api_username = "acct"
            api_password = "secret"
            quality = "High"
            request_timeout = 10
            max_poll_attempts = 5
            poll_interval_ms = 250

            [cache]
            ttl_hours = 12

            [rules]
            extra_reserved_domains = ["spamtest.dev"]
        "#;
        let parsed: ConfigFile = toml::from_str(raw).unwrap();
        assert_eq!(parsed.remote.api_username.as_deref(), Some("acct"));
        assert_eq!(parsed.remote.max_poll_attempts, Some(5));
        assert_eq!(parsed.cache.ttl_hours, Some(12));
        assert_eq!(
            parsed.rules.extra_reserved_domains.as_deref(),
            Some(&["spamtest.dev".to_string()][..])
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let raw = r#"
            [remote]
            api_user = "typo"
        "#;
        assert!(toml::from_str::<ConfigFile>(raw).is_err());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let parsed: ConfigFile = toml::from_str("").unwrap();
        assert!(parsed.remote.api_username.is_none());
        assert!(parsed.cache.ttl_hours.is_none());
    }
}
