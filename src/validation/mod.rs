//! The email validation chain.
//!
//! Stages share one capability interface, [`EmailValidator`], and are
//! composed by explicit construction: the rule filter wraps the cache,
//! which wraps the remote client (or the passthrough client when no remote
//! credentials are configured). Expensive third-party calls happen only
//! when the cheap local checks cannot already decide the answer.

pub mod cache;
pub(crate) mod disposable;
pub mod null;
pub mod remote;
pub mod rules;

pub use cache::CachedValidator;
pub use null::NullValidator;
pub use remote::RemoteVerifier;
pub use rules::RuleValidator;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::models::{ValidationResult, ValidationStatus};
use async_trait::async_trait;
use std::sync::Arc;

/// Canonical form of an address for identity purposes: trimmed and
/// case-folded. Every stage that keys or matches on an address uses this.
pub(crate) fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Capability interface shared by every stage of the validation chain.
///
/// `validate` and `validate_batch` never fail: indeterminate outcomes are
/// expressed as `unknown` results. `validate_batch` returns exactly one
/// result per input, in input order.
#[async_trait]
pub trait EmailValidator: Send + Sync {
    /// Identifies this component; wrappers compose their inner name.
    fn provider_name(&self) -> String;

    async fn validate(&self, email: &str) -> ValidationResult;

    async fn validate_batch(&self, emails: &[String]) -> Vec<ValidationResult>;

    /// Admission policy. The default — reject only confident `invalid`
    /// verdicts — is the single place policy is defined; wrappers delegate
    /// here through their innermost client.
    fn should_allow(&self, result: &ValidationResult) -> bool {
        result.status != ValidationStatus::Invalid
    }

    /// Drops memoized results held anywhere in this chain. No-op for
    /// stages that hold none.
    fn clear_cache(&self) {}

    /// Number of memoized results currently held in this chain.
    fn cache_size(&self) -> usize {
        0
    }
}

#[async_trait]
impl EmailValidator for Arc<dyn EmailValidator> {
    fn provider_name(&self) -> String {
        self.as_ref().provider_name()
    }

    async fn validate(&self, email: &str) -> ValidationResult {
        self.as_ref().validate(email).await
    }

    async fn validate_batch(&self, emails: &[String]) -> Vec<ValidationResult> {
        self.as_ref().validate_batch(emails).await
    }

    fn should_allow(&self, result: &ValidationResult) -> bool {
        self.as_ref().should_allow(result)
    }

    fn clear_cache(&self) {
        self.as_ref().clear_cache();
    }

    fn cache_size(&self) -> usize {
        self.as_ref().cache_size()
    }
}

/// Builds the validation chain for the given configuration.
///
/// With remote credentials: `rules → cache → remote`. Without them:
/// `rules → null`, so obviously bad addresses are still rejected even when
/// deep verification is disabled.
pub fn build_validator(config: &Config) -> Result<Arc<dyn EmailValidator>> {
    if config.has_remote_credentials() {
        let remote = RemoteVerifier::from_config(config)?;
        let cached = CachedValidator::new(remote, config.cache_ttl);
        let chain = RuleValidator::new(cached, config);
        tracing::info!(
            target: "validation",
            provider = %chain.provider_name(),
            "Validation chain built with remote verification"
        );
        Ok(Arc::new(chain))
    } else {
        let chain = RuleValidator::new(NullValidator::new(), config);
        tracing::info!(
            target: "validation",
            provider = %chain.provider_name(),
            "No remote credentials configured; deep verification disabled"
        );
        Ok(Arc::new(chain))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ConfigBuilder;

    fn config(with_credentials: bool) -> Config {
        let builder = ConfigBuilder::new().without_config_file().without_env();
        let builder = if with_credentials {
            builder.api_credentials("acct", "secret")
        } else {
            builder
        };
        builder.build().unwrap()
    }

    #[test]
    fn factory_builds_remote_chain_with_credentials() {
        let validator = build_validator(&config(true)).unwrap();
        assert_eq!(validator.provider_name(), "rules:cached:remote");
    }

    #[test]
    fn factory_builds_null_chain_without_credentials() {
        let validator = build_validator(&config(false)).unwrap();
        assert_eq!(validator.provider_name(), "rules:null");
    }

    #[tokio::test]
    async fn default_policy_rejects_only_invalid() {
        let validator = NullValidator::new();
        for (status, allowed) in [
            (ValidationStatus::Valid, true),
            (ValidationStatus::Risky, true),
            (ValidationStatus::Unknown, true),
            (ValidationStatus::Invalid, false),
        ] {
            let result = ValidationResult {
                email: "a@b.com".to_string(),
                status,
                provider: "test".to_string(),
                is_deliverable: allowed,
                is_disposable: false,
                is_role_based: false,
                is_free_provider: false,
                reason: None,
                raw_response: None,
            };
            assert_eq!(validator.should_allow(&result), allowed, "status {status:?}");
        }
    }
}
