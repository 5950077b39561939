//! HTTP transport to the remote verification service.
//!
//! The trait exists so the polling/failure logic in the client can be
//! exercised against a stub without a live endpoint.

use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use crate::validation::remote::wire::{JobResponse, SubmissionEntry, SubmissionRequest};
use async_trait::async_trait;
use url::Url;

#[async_trait]
pub(crate) trait VerificationTransport: Send + Sync {
    /// Submits one verification job for the given addresses.
    async fn submit(&self, addresses: &[String], quality: &str) -> Result<JobResponse>;

    /// Fetches the current state of a previously submitted job.
    async fn poll(&self, job_id: &str) -> Result<JobResponse>;
}

/// Production transport speaking JSON over HTTPS with basic auth.
#[derive(Debug)]
pub(crate) struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: String,
}

impl HttpTransport {
    pub(crate) fn from_config(config: &Config) -> Result<Self> {
        let (username, password) = match (&config.api_username, &config.api_password) {
            (Some(u), Some(p)) => (u.clone(), p.clone()),
            _ => {
                return Err(AppError::Initialization(
                    "Remote verification requires api_username and api_password".to_string(),
                ))
            }
        };

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(format!("email-warden/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::Initialization(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            username,
            password,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                AppError::Config("API base URL cannot be used as a base".to_string())
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn classify_status(response: &reqwest::Response) -> Option<AppError> {
        match response.status().as_u16() {
            200 | 202 => None,
            401 => Some(AppError::Auth),
            402 => Some(AppError::Quota),
            code => Some(AppError::UnexpectedStatus(code)),
        }
    }
}

#[async_trait]
impl VerificationTransport for HttpTransport {
    async fn submit(&self, addresses: &[String], quality: &str) -> Result<JobResponse> {
        let payload = SubmissionRequest {
            entries: addresses
                .iter()
                .map(|address| SubmissionEntry { input: address })
                .collect(),
            quality,
        };

        let response = self
            .http
            .post(self.endpoint(&["jobs"])?)
            .basic_auth(&self.username, Some(&self.password))
            .json(&payload)
            .send()
            .await?;

        if let Some(err) = Self::classify_status(&response) {
            return Err(err);
        }
        Ok(response.json::<JobResponse>().await?)
    }

    async fn poll(&self, job_id: &str) -> Result<JobResponse> {
        let response = self
            .http
            .get(self.endpoint(&["jobs", job_id])?)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        // 410 from the polling endpoint means the job is gone for good.
        if response.status().as_u16() == 410 {
            return Err(AppError::JobExpired(job_id.to_string()));
        }
        if let Some(err) = Self::classify_status(&response) {
            return Err(err);
        }
        Ok(response.json::<JobResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport_with_base(base: &str) -> HttpTransport {
        let config = crate::core::config::ConfigBuilder::new()
            .without_config_file()
            .without_env()
            .api_credentials("acct", "secret")
            .api_base_url(base)
            .build()
            .unwrap();
        HttpTransport::from_config(&config).unwrap()
    }

    #[test]
    fn endpoints_extend_the_base_path() {
        let transport = transport_with_base("https://api.verimail.io/v1");
        assert_eq!(
            transport.endpoint(&["jobs"]).unwrap().as_str(),
            "https://api.verimail.io/v1/jobs"
        );
        assert_eq!(
            transport.endpoint(&["jobs", "job-9"]).unwrap().as_str(),
            "https://api.verimail.io/v1/jobs/job-9"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_tolerated() {
        let transport = transport_with_base("https://api.verimail.io/v1/");
        assert_eq!(
            transport.endpoint(&["jobs"]).unwrap().as_str(),
            "https://api.verimail.io/v1/jobs"
        );
    }

    #[test]
    fn missing_credentials_fail_initialization() {
        let config = crate::core::config::ConfigBuilder::new()
            .without_config_file()
            .without_env()
            .build()
            .unwrap();
        assert!(matches!(
            HttpTransport::from_config(&config).unwrap_err(),
            AppError::Initialization(_)
        ));
    }
}
