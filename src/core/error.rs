//! Defines the custom error types for the email-warden core.

use std::io;
use thiserror::Error;
use url::ParseError as UrlParseError;

/// The primary error type for the validation pipeline.
///
/// Remote-stage variants never cross the client boundary: the remote client
/// catches them and resolves every affected address to an `unknown` result.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error occurring during configuration loading or validation.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error initializing necessary components (e.g., HTTP clients).
    #[error("Initialization Error: {0}")]
    Initialization(String),

    /// Error related to file input/output operations.
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    /// Error during JSON serialization or deserialization.
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing a URL.
    #[error("URL Parsing Error: {0}")]
    UrlParse(#[from] UrlParseError),

    /// Error making HTTP requests via reqwest.
    #[error("HTTP Request Error: {0}")]
    Request(#[from] reqwest::Error),

    /// The verification provider rejected our credentials.
    #[error("Authentication failed")]
    Auth,

    /// The verification account is out of credits or over quota.
    #[error("Insufficient credits")]
    Quota,

    /// The provider answered with a status code we have no handling for.
    #[error("Unexpected provider status: {0}")]
    UnexpectedStatus(u16),

    /// The provider reports the verification job as expired or gone.
    /// Terminal: polling again will not bring it back.
    #[error("Verification job expired: {0}")]
    JobExpired(String),

    /// Polling attempts ran out before the job completed.
    #[error("Poll budget exhausted for job: {0}")]
    PollBudgetExhausted(String),

    /// The provider response was missing a required field.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// An underlying error that doesn't fit other categories, using anyhow.
    #[error("Generic Error: {0}")]
    Generic(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
