// src/admin/dashboard.rs
//! Admin session: holds the capability token and the panels it unlocks

use crate::admin::panels::{ApplicationsPanel, JobTable, StatsPanel};
use crate::admin::poster::JobPoster;
use crate::app_log;
use crate::core::{CapabilityToken, JobBoardApi, TokenStore};
use crate::error::{ClientError, Result};
use crate::listing::RenderTarget;
use crate::prompt::Confirm;
use crate::types::{CreatedJob, JobUpdate, NewJob, Stats};

pub const DELETE_CONFIRMATION: &str = "Permanent delete this listing?";
pub const INVALID_ACCESS_KEY: &str = "Invalid Access Key";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminTab {
    #[default]
    Jobs,
    Applications,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// Everything the dashboard screen draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub active_tab: AdminTab,
    pub stats: Option<String>,
    pub job_rows: Vec<String>,
    pub application_rows: Vec<String>,
}

pub struct AdminDashboard {
    store: TokenStore,
    token: Option<CapabilityToken>,
    active_tab: AdminTab,
    poster: JobPoster,
    table: JobTable,
    stats: StatsPanel,
    applications: ApplicationsPanel,
}

impl AdminDashboard {
    /// Restore any persisted token; its presence decides dashboard vs login form.
    pub fn new(store: TokenStore) -> Result<Self> {
        let token = store.load()?;
        Ok(Self {
            store,
            token,
            active_tab: AdminTab::default(),
            poster: JobPoster::default(),
            table: JobTable::default(),
            stats: StatsPanel::default(),
            applications: ApplicationsPanel::default(),
        })
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn active_tab(&self) -> AdminTab {
        self.active_tab
    }

    pub fn show_tab(&mut self, tab: AdminTab) {
        self.active_tab = tab;
    }

    pub fn table(&self) -> &JobTable {
        &self.table
    }

    pub fn applications(&self) -> &ApplicationsPanel {
        &self.applications
    }

    pub fn stats(&self) -> Option<&Stats> {
        self.stats.stats()
    }

    pub fn poster(&self) -> &JobPoster {
        &self.poster
    }

    fn require_token(&self) -> Result<CapabilityToken> {
        self.token
            .clone()
            .ok_or_else(|| ClientError::Validation("Admin login required".into()))
    }

    /// The server is the only judge of the token: it is kept only if a privileged
    /// read succeeds with it.
    pub async fn login<A: JobBoardApi>(&mut self, api: &A, raw: &str) -> Result<()> {
        let token = CapabilityToken::new(raw)
            .ok_or_else(|| ClientError::Validation("Access key is required".into()))?;

        match self.stats.load(api, &token).await {
            Ok(_) => {}
            Err(e) if e.is_unauthorized() => {
                app_log!(warn, "Admin login rejected");
                return Err(ClientError::http(e.status().unwrap_or(401), INVALID_ACCESS_KEY));
            }
            Err(e) => return Err(e),
        }

        self.store.save(&token)?;
        self.token = Some(token);
        app_log!(info, "Admin session started");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.clear()?;
        self.token = None;
        self.table = JobTable::default();
        self.stats = StatsPanel::default();
        self.applications = ApplicationsPanel::default();
        self.active_tab = AdminTab::default();
        app_log!(info, "Admin session ended");
        Ok(())
    }

    /// Load every panel. Failures are logged, never surfaced.
    pub async fn show_dashboard<A: JobBoardApi>(&mut self, api: &A) -> Result<()> {
        self.require_token()?;
        self.refresh_stats(api).await;
        self.refresh_table(api).await;
        self.refresh_applications(api).await;
        Ok(())
    }

    pub async fn refresh_stats<A: JobBoardApi>(&mut self, api: &A) -> bool {
        let Ok(token) = self.require_token() else {
            return false;
        };
        match self.stats.load(api, &token).await {
            Ok(_) => true,
            Err(e) => {
                app_log!(error, "Failed to load stats: {}", e);
                false
            }
        }
    }

    pub async fn refresh_table<A: JobBoardApi>(&mut self, api: &A) -> bool {
        let Ok(token) = self.require_token() else {
            return false;
        };
        match self.table.load(api, &token).await {
            Ok(()) => true,
            Err(e) => {
                app_log!(error, "Failed to load jobs table: {}", e);
                false
            }
        }
    }

    pub async fn refresh_applications<A: JobBoardApi>(&mut self, api: &A) -> bool {
        let Ok(token) = self.require_token() else {
            return false;
        };
        match self.applications.load(api, &token).await {
            Ok(()) => true,
            Err(e) => {
                app_log!(error, "Failed to load applications: {}", e);
                false
            }
        }
    }

    /// Create a job, then reload stats and the table from the server.
    pub async fn post_job<A: JobBoardApi>(&mut self, api: &A, job: &NewJob) -> Result<CreatedJob> {
        let token = self.require_token()?;
        let created = self.poster.post_job(api, &token, job).await?;
        self.refresh_stats(api).await;
        self.refresh_table(api).await;
        Ok(created)
    }

    pub async fn update_job<A: JobBoardApi>(
        &mut self,
        api: &A,
        id: i64,
        update: &JobUpdate,
    ) -> Result<()> {
        let token = self.require_token()?;
        if update.is_empty() {
            return Err(ClientError::Validation("Nothing to update".into()));
        }

        api.update_job(&token, id, update).await?;
        app_log!(info, "Updated job {}", id);
        self.refresh_table(api).await;
        self.refresh_stats(api).await;
        Ok(())
    }

    /// Delete after explicit confirmation, then reload the table and stats.
    pub async fn delete_job<A: JobBoardApi, C: Confirm>(
        &mut self,
        api: &A,
        confirm: &mut C,
        id: i64,
    ) -> Result<DeleteOutcome> {
        let token = self.require_token()?;
        if !confirm.confirm(DELETE_CONFIRMATION) {
            app_log!(debug, "Delete of job {} cancelled", id);
            return Ok(DeleteOutcome::Cancelled);
        }

        api.delete_job(&token, id).await?;
        app_log!(info, "Deleted job {}", id);
        self.refresh_table(api).await;
        self.refresh_stats(api).await;
        Ok(DeleteOutcome::Deleted)
    }

    pub fn view(&self, target: RenderTarget) -> DashboardView {
        DashboardView {
            active_tab: self.active_tab,
            stats: self.stats.stats().map(|s| target.stats(s)),
            job_rows: self.table.rows(target),
            application_rows: self.applications.rows(target),
        }
    }
}
