// src/listing/controller.rs
use crate::app_log;
use crate::core::JobBoardApi;
use crate::error::Result;
use crate::listing::filter::{filter, SearchCriteria};
use crate::listing::render::{ListingView, RenderTarget};
use crate::types::Job;

/// Owns the job collection fetched on the last successful load. Searches run against
/// that snapshot and never go back to the network.
#[derive(Debug, Default)]
pub struct ListingController {
    jobs: Vec<Job>,
    target: RenderTarget,
    loaded: bool,
}

impl ListingController {
    pub fn new(target: RenderTarget) -> Self {
        Self {
            jobs: Vec::new(),
            target,
            loaded: false,
        }
    }

    pub fn target(&self) -> RenderTarget {
        self.target
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn find(&self, id: i64) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    /// Fetch the full listing and render it. On failure the previous collection stays.
    pub async fn load_jobs<A: JobBoardApi>(&mut self, api: &A) -> Result<ListingView> {
        let jobs = api.list_jobs().await.map_err(|e| {
            app_log!(debug, "Job load failed, keeping {} jobs: {}", self.jobs.len(), e);
            e
        })?;

        app_log!(info, "Loaded {} jobs", jobs.len());
        self.jobs = jobs;
        self.loaded = true;
        Ok(self.render(&self.jobs))
    }

    pub fn filter(&self, criteria: &SearchCriteria) -> Vec<&Job> {
        filter(&self.jobs, criteria)
    }

    /// Filter the loaded collection and render the matches.
    pub fn search(&self, criteria: &SearchCriteria) -> ListingView {
        let matches = self.filter(criteria);
        app_log!(
            debug,
            "Search matched {} of {} jobs",
            matches.len(),
            self.jobs.len()
        );
        self.render(matches)
    }

    pub fn render<'a, I>(&self, jobs: I) -> ListingView
    where
        I: IntoIterator<Item = &'a Job>,
    {
        self.target.render(jobs)
    }
}
