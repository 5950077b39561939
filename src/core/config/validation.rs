//! Cross-field sanity checks applied after all config sources are merged.

use crate::core::config::Config;
use crate::core::error::{AppError, Result};

pub(crate) fn validate(config: &Config) -> Result<()> {
    if config.request_timeout.is_zero() {
        return Err(AppError::Config(
            "request_timeout must be greater than zero".to_string(),
        ));
    }

    if config.max_poll_attempts == 0 {
        return Err(AppError::Config(
            "max_poll_attempts must be at least 1".to_string(),
        ));
    }

    if config.quality.trim().is_empty() {
        return Err(AppError::Config("quality must not be empty".to_string()));
    }

    match config.api_base_url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AppError::Config(format!(
                "API base URL must be http(s), got scheme '{}'",
                other
            )));
        }
    }

    // One half of the credentials without the other is almost certainly a
    // deployment mistake; it silently selects the passthrough client.
    if config.api_username.is_some() != config.api_password.is_some() {
        tracing::warn!(
            target: "config",
            "Only one of api_username/api_password is set; remote verification stays disabled"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn zero_poll_attempts_rejected() {
        let mut config = Config::default();
        config.max_poll_attempts = 0;
        assert!(matches!(
            validate(&config).unwrap_err(),
            AppError::Config(_)
        ));
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = Config::default();
        config.request_timeout = Duration::ZERO;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn non_http_base_url_rejected() {
        let mut config = Config::default();
        config.api_base_url = url::Url::parse("ftp://api.verimail.io/v1").unwrap();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn empty_quality_rejected() {
        let mut config = Config::default();
        config.quality = "  ".to_string();
        assert!(validate(&config).is_err());
    }
}
