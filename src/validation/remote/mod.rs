//! Client for the external deliverability verification service.
//!
//! One job is submitted per call (never one per address); if the service
//! answers asynchronously the job is polled at a fixed interval until it
//! completes or the attempt budget runs out. Every failure mode resolves to
//! an `unknown` result rather than an error: a provider outage degrades
//! accuracy, not availability.

pub(crate) mod transport;
pub(crate) mod wire;

use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use crate::core::models::{ValidationResult, ValidationStatus};
use crate::validation::remote::transport::{HttpTransport, VerificationTransport};
use crate::validation::remote::wire::{JobEntry, JobResponse, JobStatus};
use crate::validation::{normalize, EmailValidator};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

const PROVIDER: &str = "remote";

/// Remote verification client.
pub struct RemoteVerifier {
    transport: Box<dyn VerificationTransport>,
    quality: String,
    max_poll_attempts: u32,
    poll_interval: Duration,
}

impl RemoteVerifier {
    /// Builds a verifier talking HTTP to the configured endpoint. Requires
    /// credentials to be present in the config.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            transport: Box::new(HttpTransport::from_config(config)?),
            quality: config.quality.clone(),
            max_poll_attempts: config.max_poll_attempts,
            poll_interval: config.poll_interval,
        })
    }

    pub(crate) fn with_transport(
        transport: impl VerificationTransport + 'static,
        quality: impl Into<String>,
        max_poll_attempts: u32,
        poll_interval: Duration,
    ) -> Self {
        Self {
            transport: Box::new(transport),
            quality: quality.into(),
            max_poll_attempts,
            poll_interval,
        }
    }

    /// Submits a job and drives it to completion.
    async fn run_job(&self, addresses: &[String]) -> Result<JobResponse> {
        let submitted = self.transport.submit(addresses, &self.quality).await?;

        match submitted.job.status {
            JobStatus::Completed => return Ok(submitted),
            JobStatus::Expired => {
                return Err(AppError::JobExpired(submitted.job.id));
            }
            JobStatus::Pending => {}
        }

        let job_id = submitted.job.id;
        if job_id.is_empty() {
            return Err(AppError::MalformedResponse(
                "pending job carried no id".to_string(),
            ));
        }

        for attempt in 1..=self.max_poll_attempts {
            tokio::time::sleep(self.poll_interval).await;
            match self.transport.poll(&job_id).await {
                Ok(update) => match update.job.status {
                    JobStatus::Completed => {
                        tracing::debug!(
                            target: "validation_remote",
                            job_id = %job_id, attempt, "Job completed"
                        );
                        return Ok(update);
                    }
                    JobStatus::Expired => return Err(AppError::JobExpired(job_id)),
                    JobStatus::Pending => {
                        tracing::trace!(
                            target: "validation_remote",
                            job_id = %job_id, attempt, "Job still pending"
                        );
                    }
                },
                // Expired is terminal; anything else might be transient,
                // so keep polling until the budget runs out.
                Err(err @ AppError::JobExpired(_)) => return Err(err),
                Err(err) => {
                    tracing::warn!(
                        target: "validation_remote",
                        job_id = %job_id, attempt, error = %err, "Poll attempt failed"
                    );
                }
            }
        }

        Err(AppError::PollBudgetExhausted(job_id))
    }

    /// Matches completed-job entries back to the submitted addresses.
    ///
    /// Entries are keyed by normalized input; duplicate submissions consume
    /// the provider's entries for that key in order. An address without a
    /// matching entry resolves to `unknown` on its own, independent of its
    /// siblings.
    fn assemble(&self, emails: &[String], response: JobResponse) -> Vec<ValidationResult> {
        let mut by_input: HashMap<String, VecDeque<JobEntry>> = HashMap::new();
        for entry in response.entries {
            by_input
                .entry(normalize(&entry.input))
                .or_default()
                .push_back(entry);
        }

        emails
            .iter()
            .map(|email| {
                match by_input
                    .get_mut(&normalize(email))
                    .and_then(VecDeque::pop_front)
                {
                    Some(entry) => entry_to_result(email, entry),
                    None => {
                        tracing::warn!(
                            target: "validation_remote",
                            email = %email, "No entry for address in completed job"
                        );
                        ValidationResult::unknown(email, PROVIDER, "Entry not found in response")
                    }
                }
            })
            .collect()
    }
}

fn map_classification(classification: &str) -> ValidationStatus {
    match classification {
        "Deliverable" => ValidationStatus::Valid,
        "Undeliverable" => ValidationStatus::Invalid,
        "Risky" => ValidationStatus::Risky,
        _ => ValidationStatus::Unknown,
    }
}

fn entry_to_result(email: &str, entry: JobEntry) -> ValidationResult {
    let status = map_classification(&entry.classification);
    let raw_response = serde_json::to_value(&entry).ok();
    ValidationResult {
        email: email.to_string(),
        status,
        provider: PROVIDER.to_string(),
        is_deliverable: status == ValidationStatus::Valid,
        is_disposable: entry.flags.disposable,
        is_role_based: entry.flags.role_account,
        is_free_provider: entry.flags.free_provider,
        reason: entry.detail,
        raw_response,
    }
}

/// Human-readable cause attached to fail-open results.
fn failure_reason(error: &AppError) -> String {
    match error {
        AppError::Request(e) if e.is_timeout() => "Request timed out".to_string(),
        AppError::Request(e) if e.is_connect() => format!("Connection error: {}", e),
        AppError::Request(e) => format!("Transport error: {}", e),
        AppError::Auth => "Authentication failed".to_string(),
        AppError::Quota => "Insufficient credits".to_string(),
        AppError::UnexpectedStatus(code) => format!("Unexpected provider status {}", code),
        AppError::JobExpired(_) => "Verification job expired".to_string(),
        AppError::PollBudgetExhausted(_) => {
            "Verification job did not complete in time".to_string()
        }
        other => other.to_string(),
    }
}

#[async_trait]
impl EmailValidator for RemoteVerifier {
    fn provider_name(&self) -> String {
        PROVIDER.to_string()
    }

    async fn validate(&self, email: &str) -> ValidationResult {
        let emails = [email.to_string()];
        self.validate_batch(&emails)
            .await
            .into_iter()
            .next()
            .unwrap_or_else(|| ValidationResult::unknown(email, PROVIDER, "Empty batch result"))
    }

    async fn validate_batch(&self, emails: &[String]) -> Vec<ValidationResult> {
        if emails.is_empty() {
            return Vec::new();
        }

        match self.run_job(emails).await {
            Ok(response) => self.assemble(emails, response),
            Err(error) => {
                tracing::warn!(
                    target: "validation_remote",
                    error = %error,
                    addresses = emails.len(),
                    "Remote verification failed; failing open"
                );
                let reason = failure_reason(&error);
                emails
                    .iter()
                    .map(|email| ValidationResult::unknown(email, PROVIDER, reason.clone()))
                    .collect()
            }
        }
    }
}
