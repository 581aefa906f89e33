// src/admin/poster.rs
use crate::app_log;
use crate::core::{CapabilityToken, InFlight, JobBoardApi};
use crate::error::Result;
use crate::types::{CreatedJob, NewJob};

/// Publishes new listings. Nothing is inserted locally; callers reload from the server.
#[derive(Debug, Default)]
pub struct JobPoster {
    in_flight: bool,
}

impl JobPoster {
    pub fn submit_enabled(&self) -> bool {
        !self.in_flight
    }

    pub async fn post_job<A: JobBoardApi>(
        &mut self,
        api: &A,
        token: &CapabilityToken,
        job: &NewJob,
    ) -> Result<CreatedJob> {
        job.validate()?;

        let created = {
            let _busy = InFlight::start(&mut self.in_flight);
            api.create_job(token, job).await?
        };
        app_log!(info, "Published job {} ({})", created.id, job.title);
        Ok(created)
    }
}
