//! Zero-I/O rule filter: rejects obviously undeliverable addresses before
//! anything downstream spends a network call on them.

use crate::core::config::Config;
use crate::core::models::ValidationResult;
use crate::validation::disposable::is_disposable_domain;
use crate::validation::{normalize, EmailValidator};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashSet;

const PROVIDER: &str = "rules";

/// RFC 2606 reserved domains plus common test patterns.
static RESERVED_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "example.com",
        "example.org",
        "example.net",
        "example.edu",
        "test.com",
        "test.org",
        "test.net",
        "localhost",
        "localhost.localdomain",
        "invalid",
        "example",
        "test",
    ]
    .into_iter()
    .collect()
});

/// TLDs that are reserved and never resolve to real mailboxes.
static RESERVED_TLDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["test", "example", "invalid", "localhost"].into_iter().collect());

/// Rule filter wrapping another validator.
///
/// Checks run in order, short-circuiting on the first failure: format,
/// reserved domain, reserved TLD, disposable domain. Survivors are passed
/// to the wrapped validator in normalized (trimmed, lowercased) form.
pub struct RuleValidator<V> {
    inner: V,
    extra_reserved_domains: HashSet<String>,
}

impl<V: EmailValidator> RuleValidator<V> {
    pub fn new(inner: V, config: &Config) -> Self {
        Self {
            inner,
            extra_reserved_domains: config.extra_reserved_domains.clone(),
        }
    }

    /// A filter without operator-curated additions.
    pub fn with_defaults(inner: V) -> Self {
        Self {
            inner,
            extra_reserved_domains: HashSet::new(),
        }
    }

    /// Runs the local checks on an already-normalized address. `None`
    /// means the address survived and must go downstream.
    fn local_verdict(&self, email: &str) -> Option<ValidationResult> {
        let domain = match split_valid_format(email) {
            Some((_, domain)) => domain,
            None => {
                tracing::debug!(target: "validation_rules", email, "Rejected: bad format");
                return Some(ValidationResult::invalid(email, PROVIDER, "Invalid email format"));
            }
        };

        if RESERVED_DOMAINS.contains(domain) || self.extra_reserved_domains.contains(domain) {
            tracing::debug!(target: "validation_rules", email, domain, "Rejected: reserved domain");
            return Some(ValidationResult::invalid(
                email,
                PROVIDER,
                format!("Reserved domain: {}", domain),
            ));
        }

        let tld = domain.rsplit('.').next().unwrap_or(domain);
        if RESERVED_TLDS.contains(tld) {
            tracing::debug!(target: "validation_rules", email, tld, "Rejected: reserved TLD");
            return Some(ValidationResult::invalid(
                email,
                PROVIDER,
                format!("Reserved TLD: {}", tld),
            ));
        }

        if is_disposable_domain(domain) {
            tracing::debug!(target: "validation_rules", email, domain, "Rejected: disposable domain");
            return Some(ValidationResult::invalid(
                email,
                PROVIDER,
                format!("Disposable domain: {}", domain),
            ));
        }

        None
    }
}

/// Splits `local@domain` when the basic shape holds: exactly one `@`,
/// non-empty local part and domain, and a dotted domain unless the whole
/// domain is itself a reserved TLD token (caught by the TLD check next).
fn split_valid_format(email: &str) -> Option<(&str, &str)> {
    let mut parts = email.split('@');
    let (local, domain) = (parts.next()?, parts.next()?);
    if parts.next().is_some() || local.is_empty() || domain.is_empty() {
        return None;
    }
    if !domain.contains('.') && !RESERVED_TLDS.contains(domain) {
        return None;
    }
    Some((local, domain))
}

#[async_trait]
impl<V: EmailValidator> EmailValidator for RuleValidator<V> {
    fn provider_name(&self) -> String {
        format!("{}:{}", PROVIDER, self.inner.provider_name())
    }

    async fn validate(&self, email: &str) -> ValidationResult {
        let normalized = normalize(email);
        match self.local_verdict(&normalized) {
            Some(rejection) => rejection,
            None => self.inner.validate(&normalized).await,
        }
    }

    async fn validate_batch(&self, emails: &[String]) -> Vec<ValidationResult> {
        let mut results: Vec<Option<ValidationResult>> = Vec::with_capacity(emails.len());
        let mut to_forward: Vec<String> = Vec::new();
        let mut forward_indices: Vec<usize> = Vec::new();

        for (i, email) in emails.iter().enumerate() {
            let normalized = normalize(email);
            match self.local_verdict(&normalized) {
                Some(rejection) => results.push(Some(rejection)),
                None => {
                    results.push(None);
                    to_forward.push(normalized);
                    forward_indices.push(i);
                }
            }
        }

        if !to_forward.is_empty() {
            let forwarded = self.inner.validate_batch(&to_forward).await;
            for (idx, result) in forward_indices.into_iter().zip(forwarded) {
                results[idx] = Some(result);
            }
        }

        results.into_iter().flatten().collect()
    }

    fn should_allow(&self, result: &ValidationResult) -> bool {
        self.inner.should_allow(result)
    }

    fn clear_cache(&self) {
        self.inner.clear_cache();
    }

    fn cache_size(&self) -> usize {
        self.inner.cache_size()
    }
}
