//! Passthrough client used when no remote verification provider is
//! configured. Everything is reported deliverable; the rule filter wrapped
//! around it still rejects obviously bad addresses.

use crate::core::models::{ValidationResult, ValidationStatus};
use crate::validation::EmailValidator;
use async_trait::async_trait;
use futures::future::join_all;

const PROVIDER: &str = "null";

#[derive(Debug, Default)]
pub struct NullValidator;

impl NullValidator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailValidator for NullValidator {
    fn provider_name(&self) -> String {
        PROVIDER.to_string()
    }

    async fn validate(&self, email: &str) -> ValidationResult {
        ValidationResult {
            email: email.to_string(),
            status: ValidationStatus::Valid,
            provider: PROVIDER.to_string(),
            is_deliverable: true,
            is_disposable: false,
            is_role_based: false,
            is_free_provider: false,
            reason: Some("Validation disabled".to_string()),
            raw_response: None,
        }
    }

    async fn validate_batch(&self, emails: &[String]) -> Vec<ValidationResult> {
        join_all(emails.iter().map(|email| self.validate(email))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_valid() {
        let validator = NullValidator::new();
        let result = validator.validate("anything@anywhere.dev").await;
        assert_eq!(result.status, ValidationStatus::Valid);
        assert!(result.is_deliverable);
        assert_eq!(result.reason.as_deref(), Some("Validation disabled"));
        assert_eq!(result.provider, "null");
        assert!(validator.should_allow(&result));
    }

    #[tokio::test]
    async fn batch_preserves_order() {
        let validator = NullValidator::new();
        let emails = vec!["a@b.com".to_string(), "c@d.com".to_string(), "e@f.com".to_string()];
        let results = validator.validate_batch(&emails).await;
        assert_eq!(results.len(), 3);
        for (email, result) in emails.iter().zip(&results) {
            assert_eq!(&result.email, email);
            assert_eq!(result.status, ValidationStatus::Valid);
        }
    }
}
