use serde::{Deserialize, Serialize};

// ===== Service Response Types =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_jobs: u64,
    pub active_jobs: u64,
    pub total_applications: u64,
    #[serde(default)]
    pub applications_by_status: Option<StatusBreakdown>,
}

impl Stats {
    pub fn pending(&self) -> Option<u64> {
        self.applications_by_status.as_ref().map(|s| s.pending)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    #[serde(default)]
    pub pending: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedJob {
    pub id: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Error body the API sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
}
