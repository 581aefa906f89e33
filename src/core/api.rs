// src/core/api.rs
//! The REST surface the controllers talk to. `ServiceClient` is the HTTP implementation.

use std::fmt;

use crate::error::Result;
use crate::types::{Application, ApplicationRecord, CreatedJob, Job, JobUpdate, NewJob, Stats};

/// Opaque admin credential. It is attached to privileged requests and never inspected.
#[derive(Clone, PartialEq, Eq)]
pub struct CapabilityToken(String);

impl CapabilityToken {
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CapabilityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CapabilityToken(***)")
    }
}

#[allow(async_fn_in_trait)]
pub trait JobBoardApi {
    /// `GET /jobs`
    async fn list_jobs(&self) -> Result<Vec<Job>>;

    /// `GET /jobs/all`, includes inactive jobs
    async fn list_all_jobs(&self, token: &CapabilityToken) -> Result<Vec<Job>>;

    /// `POST /jobs`
    async fn create_job(&self, token: &CapabilityToken, job: &NewJob) -> Result<CreatedJob>;

    /// `PUT /jobs/{id}`
    async fn update_job(&self, token: &CapabilityToken, id: i64, update: &JobUpdate)
        -> Result<()>;

    /// `DELETE /jobs/{id}`
    async fn delete_job(&self, token: &CapabilityToken, id: i64) -> Result<()>;

    /// `POST /jobs/{id}/apply`, public
    async fn apply(&self, application: &Application) -> Result<()>;

    /// `GET /stats`
    async fn stats(&self, token: &CapabilityToken) -> Result<Stats>;

    /// `GET /applications`
    async fn applications(&self, token: &CapabilityToken) -> Result<Vec<ApplicationRecord>>;
}
