#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use job_board::core::{CapabilityToken, JobBoardApi, TokenStore};
use job_board::types::{
    Application, ApplicationRecord, CreatedJob, Job, JobUpdate, NewJob, Stats,
};
use job_board::{ClientError, Result};

pub const ADMIN_KEY: &str = "correct-horse";

/// In-memory API that records every call by operation name.
#[derive(Default)]
pub struct FakeApi {
    pub jobs: RefCell<Vec<Job>>,
    pub applications: RefCell<Vec<ApplicationRecord>>,
    pub submitted: RefCell<Vec<Application>>,
    pub calls: RefCell<Vec<&'static str>>,
    failures: RefCell<HashMap<&'static str, ClientError>>,
    latency: Cell<Option<Duration>>,
}

impl FakeApi {
    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        let api = Self::default();
        *api.jobs.borrow_mut() = jobs;
        api
    }

    /// Make every later call of `op` fail with `err`.
    pub fn fail(&self, op: &'static str, err: ClientError) {
        self.failures.borrow_mut().insert(op, err);
    }

    pub fn recover(&self, op: &'static str) {
        self.failures.borrow_mut().remove(op);
    }

    /// Make writes (`create_job`, `apply`) take `latency` before answering.
    pub fn slow(&self, latency: Option<Duration>) {
        self.latency.set(latency);
    }

    async fn settle(&self) {
        if let Some(latency) = self.latency.get() {
            tokio::time::sleep(latency).await;
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, op: &'static str) -> Result<()> {
        self.calls.borrow_mut().push(op);
        match self.failures.borrow().get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn authorize(&self, op: &'static str, token: &CapabilityToken) -> Result<()> {
        self.record(op)?;
        if token.expose() == ADMIN_KEY {
            Ok(())
        } else {
            Err(ClientError::http(401, "Unauthorized"))
        }
    }
}

impl JobBoardApi for FakeApi {
    async fn list_jobs(&self) -> Result<Vec<Job>> {
        self.record("list_jobs")?;
        Ok(self
            .jobs
            .borrow()
            .iter()
            .filter(|job| job.is_active)
            .cloned()
            .collect())
    }

    async fn list_all_jobs(&self, token: &CapabilityToken) -> Result<Vec<Job>> {
        self.authorize("list_all_jobs", token)?;
        Ok(self.jobs.borrow().clone())
    }

    async fn create_job(&self, token: &CapabilityToken, job: &NewJob) -> Result<CreatedJob> {
        self.authorize("create_job", token)?;
        self.settle().await;
        let mut jobs = self.jobs.borrow_mut();
        let id = jobs.iter().map(|j| j.id).max().unwrap_or(0) + 1;
        let mut created = sample_job(id, &job.title, &job.company);
        created.location = job.location.clone();
        created.description = job.description.clone();
        created.salary = Some(job.salary.clone());
        jobs.push(created);
        Ok(CreatedJob {
            id,
            message: "Job created".into(),
        })
    }

    async fn update_job(&self, token: &CapabilityToken, id: i64, update: &JobUpdate) -> Result<()> {
        self.authorize("update_job", token)?;
        let mut jobs = self.jobs.borrow_mut();
        let job = jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| ClientError::http(404, "HTTP 404"))?;
        if let Some(active) = update.is_active {
            job.is_active = active;
        }
        if let Some(title) = &update.title {
            job.title = title.clone();
        }
        Ok(())
    }

    async fn delete_job(&self, token: &CapabilityToken, id: i64) -> Result<()> {
        self.authorize("delete_job", token)?;
        self.jobs.borrow_mut().retain(|j| j.id != id);
        Ok(())
    }

    async fn apply(&self, application: &Application) -> Result<()> {
        self.record("apply")?;
        self.settle().await;
        self.submitted.borrow_mut().push(application.clone());
        Ok(())
    }

    async fn stats(&self, token: &CapabilityToken) -> Result<Stats> {
        self.authorize("stats", token)?;
        let jobs = self.jobs.borrow();
        Ok(Stats {
            total_jobs: jobs.len() as u64,
            active_jobs: jobs.iter().filter(|j| j.is_active).count() as u64,
            total_applications: self.applications.borrow().len() as u64,
            applications_by_status: None,
        })
    }

    async fn applications(&self, token: &CapabilityToken) -> Result<Vec<ApplicationRecord>> {
        self.authorize("applications", token)?;
        Ok(self.applications.borrow().clone())
    }
}

pub fn sample_job(id: i64, title: &str, company: &str) -> Job {
    Job {
        id,
        title: title.to_string(),
        company: company.to_string(),
        location: "Berlin".to_string(),
        salary: None,
        category: "IT".to_string(),
        job_type: "Full-time".to_string(),
        description: format!("{} at {}", title, company),
        requirements: None,
        benefits: None,
        posted_date: None,
        is_active: true,
        application_count: 0,
    }
}

pub fn sample_jobs() -> Vec<Job> {
    vec![
        sample_job(1, "Engineer", "Acme"),
        sample_job(2, "Designer", "Globex"),
    ]
}

/// A token store under a fresh temp directory.
pub fn temp_store() -> TokenStore {
    let dir: PathBuf = std::env::temp_dir().join(format!("job_board_test_{}", uuid::Uuid::new_v4()));
    TokenStore::new(dir.join("state.toml"))
}
