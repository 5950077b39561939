//! Time-bounded memoization of positive validation results.
//!
//! Only `valid` outcomes are stored: invalid, risky, and unknown verdicts
//! can change (disposable-domain re-registrations, transient provider
//! errors), so caching them risks permanently misclassifying an address.
//! Expiry is lazy: stale entries are evicted on the lookup that finds them.

use crate::core::models::{ValidationResult, ValidationStatus};
use crate::validation::{normalize, EmailValidator};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;

/// Injectable time source so TTL behavior is testable without waiting.
type Clock = fn() -> DateTime<Utc>;

/// Caching decorator around another validator.
///
/// Keys are trimmed, case-folded addresses, matching the normalization of
/// the rest of the chain so a cache hit and a fresh call agree on identity.
/// A TTL of zero makes every entry immediately stale, which disables
/// caching without removing the component.
pub struct CachedValidator<V> {
    inner: V,
    ttl: TimeDelta,
    entries: RwLock<HashMap<String, (ValidationResult, DateTime<Utc>)>>,
    clock: Clock,
}

impl<V: EmailValidator> CachedValidator<V> {
    pub fn new(inner: V, ttl: Duration) -> Self {
        Self::with_clock(inner, ttl, Utc::now)
    }

    pub fn with_clock(inner: V, ttl: Duration, clock: Clock) -> Self {
        Self {
            inner,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Returns the fresh cached result for `key`, evicting it when stale.
    fn lookup(&self, key: &str) -> Option<ValidationResult> {
        let now = (self.clock)();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some((result, captured_at)) => {
                    if now.signed_duration_since(*captured_at) < self.ttl {
                        return Some(result.clone());
                    }
                }
                None => return None,
            }
        }
        // Entry exists but is stale.
        tracing::debug!(target: "validation_cache", key, "Evicting expired entry");
        self.entries.write().remove(key);
        None
    }

    fn store(&self, key: String, result: &ValidationResult) {
        if result.status != ValidationStatus::Valid {
            return;
        }
        self.entries
            .write()
            .insert(key, (result.clone(), (self.clock)()));
    }
}

#[async_trait]
impl<V: EmailValidator> EmailValidator for CachedValidator<V> {
    fn provider_name(&self) -> String {
        format!("cached:{}", self.inner.provider_name())
    }

    async fn validate(&self, email: &str) -> ValidationResult {
        let key = normalize(email);
        if let Some(hit) = self.lookup(&key) {
            tracing::debug!(target: "validation_cache", email, "Cache hit");
            return hit;
        }

        let result = self.inner.validate(email).await;
        self.store(key, &result);
        result
    }

    async fn validate_batch(&self, emails: &[String]) -> Vec<ValidationResult> {
        let mut results: Vec<Option<ValidationResult>> = Vec::with_capacity(emails.len());
        let mut misses: Vec<String> = Vec::new();
        let mut miss_indices: Vec<usize> = Vec::new();

        for (i, email) in emails.iter().enumerate() {
            match self.lookup(&normalize(email)) {
                Some(hit) => results.push(Some(hit)),
                None => {
                    results.push(None);
                    misses.push(email.clone());
                    miss_indices.push(i);
                }
            }
        }

        if !misses.is_empty() {
            tracing::debug!(
                target: "validation_cache",
                hits = emails.len() - misses.len(),
                misses = misses.len(),
                "Partial cache coverage; fetching misses in one batch"
            );
            let fresh = self.inner.validate_batch(&misses).await;
            for ((idx, submitted), result) in
                miss_indices.into_iter().zip(&misses).zip(fresh)
            {
                self.store(normalize(submitted), &result);
                results[idx] = Some(result);
            }
        }

        results.into_iter().flatten().collect()
    }

    fn should_allow(&self, result: &ValidationResult) -> bool {
        self.inner.should_allow(result)
    }

    /// Drops every cached entry. Operator action; normal expiry is lazy.
    fn clear_cache(&self) {
        self.entries.write().clear();
    }

    fn cache_size(&self) -> usize {
        self.entries.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::testing::RecordingValidator;
    use std::sync::atomic::{AtomicI64, Ordering};

    const DAY: Duration = Duration::from_secs(24 * 3600);

    fn cached(status: ValidationStatus) -> CachedValidator<RecordingValidator> {
        CachedValidator::new(RecordingValidator::new(status), DAY)
    }

    #[tokio::test]
    async fn valid_results_are_served_from_cache() {
        let validator = cached(ValidationStatus::Valid);
        let first = validator.validate("user@gmail.com").await;
        let second = validator.validate("user@gmail.com").await;
        assert_eq!(first.status, ValidationStatus::Valid);
        assert_eq!(second.status, ValidationStatus::Valid);
        assert_eq!(validator.inner.validate_call_count(), 1);
        assert_eq!(validator.cache_size(), 1);
    }

    #[tokio::test]
    async fn equivalent_spellings_share_one_entry() {
        let validator = cached(ValidationStatus::Valid);
        validator.validate("user@gmail.com").await;
        validator.validate("  user@gmail.com ").await;
        validator.validate("USER@GMAIL.COM").await;
        assert_eq!(validator.inner.validate_call_count(), 1);
        assert_eq!(validator.cache_size(), 1);
    }

    #[tokio::test]
    async fn non_valid_statuses_are_not_cached() {
        for status in [
            ValidationStatus::Invalid,
            ValidationStatus::Risky,
            ValidationStatus::Unknown,
        ] {
            let validator = cached(status);
            validator.validate("user@gmail.com").await;
            validator.validate("user@gmail.com").await;
            assert_eq!(
                validator.inner.validate_call_count(),
                2,
                "status {status:?} must not be cached"
            );
            assert_eq!(validator.cache_size(), 0);
        }
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        // Controllable clock: each tick advances the reported time.
        static NOW_HOURS: AtomicI64 = AtomicI64::new(0);
        fn fake_now() -> DateTime<Utc> {
            DateTime::<Utc>::from_timestamp(NOW_HOURS.load(Ordering::SeqCst) * 3600, 0).unwrap()
        }

        NOW_HOURS.store(0, Ordering::SeqCst);
        let validator = CachedValidator::with_clock(
            RecordingValidator::new(ValidationStatus::Valid),
            DAY,
            fake_now,
        );

        validator.validate("user@gmail.com").await;
        NOW_HOURS.store(23, Ordering::SeqCst);
        validator.validate("user@gmail.com").await;
        assert_eq!(validator.inner.validate_call_count(), 1);

        NOW_HOURS.store(25, Ordering::SeqCst);
        validator.validate("user@gmail.com").await;
        assert_eq!(validator.inner.validate_call_count(), 2);
    }

    #[tokio::test]
    async fn zero_ttl_disables_caching() {
        let validator = CachedValidator::new(
            RecordingValidator::new(ValidationStatus::Valid),
            Duration::ZERO,
        );
        validator.validate("user@gmail.com").await;
        validator.validate("user@gmail.com").await;
        assert_eq!(validator.inner.validate_call_count(), 2);
    }

    #[tokio::test]
    async fn batch_partial_hit_fetches_only_misses() {
        let validator = cached(ValidationStatus::Valid);
        validator.validate("cached@gmail.com").await;

        let emails = vec!["cached@gmail.com".to_string(), "new@gmail.com".to_string()];
        let results = validator.validate_batch(&emails).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].email, "cached@gmail.com");
        assert_eq!(results[1].email, "new@gmail.com");
        assert_eq!(
            validator.inner.batch_calls(),
            vec![vec!["new@gmail.com".to_string()]]
        );
    }

    #[tokio::test]
    async fn batch_all_hit_never_calls_inner() {
        let validator = cached(ValidationStatus::Valid);
        let emails = vec!["a@gmail.com".to_string(), "b@gmail.com".to_string()];
        validator.validate_batch(&emails).await;
        assert_eq!(validator.inner.batch_calls().len(), 1);

        let results = validator.validate_batch(&emails).await;
        assert_eq!(results.len(), 2);
        assert_eq!(validator.inner.batch_calls().len(), 1);
        assert_eq!(validator.inner.validate_call_count(), 0);
    }

    #[tokio::test]
    async fn clear_cache_forces_revalidation() {
        let validator = cached(ValidationStatus::Valid);
        validator.validate("user@gmail.com").await;
        assert_eq!(validator.cache_size(), 1);
        validator.clear_cache();
        assert_eq!(validator.cache_size(), 0);
        validator.validate("user@gmail.com").await;
        assert_eq!(validator.inner.validate_call_count(), 2);
    }

    #[tokio::test]
    async fn provider_name_is_composed() {
        let validator = cached(ValidationStatus::Valid);
        assert_eq!(validator.provider_name(), "cached:stub");
    }
}
