//! Shared result vocabulary for the validation chain.
//!
//! Every stage in the chain produces and consumes [`ValidationResult`]s, so
//! the chain composes uniformly regardless of which stage answered.

use serde::{Deserialize, Serialize};

/// Outcome classification for a validated email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    /// Deliverable.
    Valid,
    /// Undeliverable: bad syntax, no mailbox, reserved/disposable domain.
    Invalid,
    /// Deliverable but suspect: catch-all, disposable, role-based.
    Risky,
    /// Could not determine: timeout, provider error.
    Unknown,
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValidationStatus::Valid => "valid",
            ValidationStatus::Invalid => "invalid",
            ValidationStatus::Risky => "risky",
            ValidationStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Result of validating a single email address.
///
/// `email` is the address as submitted to the stage that produced the
/// result, not necessarily normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub email: String,
    pub status: ValidationStatus,
    /// Name of the component that produced this result. Cache wrapping is
    /// reflected by composition, e.g. `"cached:remote"`.
    pub provider: String,
    pub is_deliverable: bool,
    #[serde(default)]
    pub is_disposable: bool,
    #[serde(default)]
    pub is_role_based: bool,
    #[serde(default)]
    pub is_free_provider: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Raw provider payload, kept for debugging only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<serde_json::Value>,
}

impl ValidationResult {
    /// Builds a confident local rejection.
    pub fn invalid(email: impl Into<String>, provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            status: ValidationStatus::Invalid,
            provider: provider.into(),
            is_deliverable: false,
            is_disposable: false,
            is_role_based: false,
            is_free_provider: false,
            reason: Some(reason.into()),
            raw_response: None,
        }
    }

    /// Builds an indeterminate result. Deliverability defaults to true so
    /// an uncertain verdict never blocks a legitimate user (fail open).
    pub fn unknown(email: impl Into<String>, provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            status: ValidationStatus::Unknown,
            provider: provider.into(),
            is_deliverable: true,
            is_disposable: false,
            is_role_based: false,
            is_free_provider: false,
            reason: Some(reason.into()),
            raw_response: None,
        }
    }
}
