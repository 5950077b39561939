//! Wire-format structures spoken with the remote verification service.

use serde::{Deserialize, Serialize};

/// Body of a job submission: the addresses to verify plus the requested
/// quality tier.
#[derive(Serialize, Debug)]
pub(crate) struct SubmissionRequest<'a> {
    pub entries: Vec<SubmissionEntry<'a>>,
    pub quality: &'a str,
}

#[derive(Serialize, Debug)]
pub(crate) struct SubmissionEntry<'a> {
    pub input: &'a str,
}

/// Response shape shared by submission and polling endpoints.
#[derive(Deserialize, Debug, Clone)]
pub(crate) struct JobResponse {
    pub job: JobOverview,
    #[serde(default)]
    pub entries: Vec<JobEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct JobOverview {
    #[serde(default)]
    pub id: String,
    pub status: JobStatus,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum JobStatus {
    Pending,
    Completed,
    Expired,
}

/// Per-address verdict in a completed job.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct JobEntry {
    pub input: String,
    pub classification: String,
    #[serde(default)]
    pub flags: EntryFlags,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub(crate) struct EntryFlags {
    #[serde(default)]
    pub disposable: bool,
    #[serde(default)]
    pub role_account: bool,
    #[serde(default)]
    pub free_provider: bool,
}
