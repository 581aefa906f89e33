// src/app.rs
//! User actions as commands. Each command is routed to the controller that owns it and
//! comes back as an `Outcome` for the caller to draw; notifications are raised here.

use crate::admin::{AdminDashboard, AdminTab, DashboardView, DeleteOutcome};
use crate::app_log;
use crate::apply::{ApplicationSubmitter, ApplyForm, InputVariant};
use crate::core::{JobBoardApi, TokenStore};
use crate::error::{ClientError, Result};
use crate::listing::{ListingController, ListingView, RenderTarget, SearchCriteria};
use crate::notify::{Notification, Notifier};
use crate::prompt::Prompter;
use crate::types::{CreatedJob, JobUpdate, NewJob};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadJobs,
    Search(SearchCriteria),
    /// Title falls back to the loaded listing when not given.
    OpenApply {
        job_id: i64,
        job_title: Option<String>,
    },
    SubmitApplication(ApplyForm),
    CloseApply,
    Login(String),
    Logout,
    ShowDashboard,
    ShowTab(AdminTab),
    RefreshStats,
    PostJob(NewJob),
    UpdateJob { id: i64, update: JobUpdate },
    DeleteJob(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Listing(ListingView),
    ApplyOpened { job_id: i64, job_title: String },
    ApplicationSubmitted { job_id: i64 },
    ApplyCancelled,
    ApplyClosed,
    LoginRequired,
    Dashboard(DashboardView),
    JobPosted(CreatedJob),
    JobUpdated(i64),
    JobDeleted(i64),
    DeleteCancelled(i64),
    LoggedOut,
    Failed(ClientError),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

pub struct App<A, N, P> {
    api: A,
    notifier: N,
    prompter: P,
    target: RenderTarget,
    listing: ListingController,
    submitter: ApplicationSubmitter,
    admin: AdminDashboard,
}

impl<A, N, P> App<A, N, P>
where
    A: JobBoardApi,
    N: Notifier,
    P: Prompter,
{
    pub fn new(api: A, notifier: N, prompter: P, store: TokenStore) -> Result<Self> {
        Ok(Self {
            api,
            notifier,
            prompter,
            target: RenderTarget::default(),
            listing: ListingController::new(RenderTarget::default()),
            submitter: ApplicationSubmitter::new(InputVariant::default()),
            admin: AdminDashboard::new(store)?,
        })
    }

    pub fn with_target(mut self, target: RenderTarget) -> Self {
        self.target = target;
        self.listing = ListingController::new(target);
        self
    }

    pub fn with_variant(mut self, variant: InputVariant) -> Self {
        self.submitter = ApplicationSubmitter::new(variant);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn listing(&self) -> &ListingController {
        &self.listing
    }

    pub fn submitter(&self) -> &ApplicationSubmitter {
        &self.submitter
    }

    pub fn admin(&self) -> &AdminDashboard {
        &self.admin
    }

    pub async fn dispatch(&mut self, command: Command) -> Outcome {
        app_log!(debug, "Dispatching {:?}", command_name(&command));
        match command {
            Command::LoadJobs => self.load_jobs().await,
            Command::Search(criteria) => Outcome::Listing(self.listing.search(&criteria)),
            Command::OpenApply { job_id, job_title } => self.open_apply(job_id, job_title).await,
            Command::SubmitApplication(form) => self.submit_application(form).await,
            Command::CloseApply => {
                self.submitter.close();
                Outcome::ApplyClosed
            }
            Command::Login(raw) => self.login(&raw).await,
            Command::Logout => self.logout(),
            Command::ShowDashboard => self.show_dashboard().await,
            Command::ShowTab(tab) => {
                self.admin.show_tab(tab);
                self.dashboard_or_login()
            }
            Command::RefreshStats => {
                self.admin.refresh_stats(&self.api).await;
                self.dashboard_or_login()
            }
            Command::PostJob(job) => self.post_job(job).await,
            Command::UpdateJob { id, update } => self.update_job(id, update).await,
            Command::DeleteJob(id) => self.delete_job(id).await,
        }
    }

    fn fail(&mut self, message: String, err: ClientError) -> Outcome {
        self.notifier.notify(Notification::error(message));
        Outcome::Failed(err)
    }

    fn dashboard_or_login(&self) -> Outcome {
        if self.admin.is_logged_in() {
            Outcome::Dashboard(self.admin.view(self.target))
        } else {
            Outcome::LoginRequired
        }
    }

    /// Load the listing without telling the user about a failure. Only used to fill in
    /// details such as job titles, so the caller carries on either way.
    pub async fn preload_listing(&mut self) -> bool {
        match self.listing.load_jobs(&self.api).await {
            Ok(_) => true,
            Err(e) => {
                app_log!(debug, "Listing preload failed: {}", e);
                false
            }
        }
    }

    async fn load_jobs(&mut self) -> Outcome {
        match self.listing.load_jobs(&self.api).await {
            Ok(view) => Outcome::Listing(view),
            Err(e) => self.fail(format!("Failed to load jobs: {}", e), e),
        }
    }

    async fn open_apply(&mut self, job_id: i64, job_title: Option<String>) -> Outcome {
        let job_title = job_title
            .or_else(|| self.listing.find(job_id).map(|job| job.title.clone()))
            .unwrap_or_else(|| format!("job #{}", job_id));
        self.submitter.open_apply(job_id, &job_title);

        if self.submitter.variant() == InputVariant::Modal {
            return Outcome::ApplyOpened { job_id, job_title };
        }

        match self.submitter.collect(&mut self.prompter) {
            Ok(Some(_)) => self.submit_current().await,
            Ok(None) => {
                self.submitter.close();
                Outcome::ApplyCancelled
            }
            Err(e) => self.fail(e.to_string(), e),
        }
    }

    async fn submit_application(&mut self, form: ApplyForm) -> Outcome {
        if let Err(e) = self.submitter.fill(form) {
            return self.fail(e.to_string(), e);
        }
        self.submit_current().await
    }

    async fn submit_current(&mut self) -> Outcome {
        match self.submitter.submit(&self.api).await {
            Ok(job_id) => {
                self.notifier
                    .notify(Notification::success("Application submitted successfully!"));
                Outcome::ApplicationSubmitted { job_id }
            }
            Err(e @ ClientError::Validation(_)) => self.fail(e.to_string(), e),
            Err(e) => self.fail(format!("Failed to submit application: {}", e), e),
        }
    }

    async fn login(&mut self, raw: &str) -> Outcome {
        match self.admin.login(&self.api, raw).await {
            Ok(()) => {
                self.notifier.notify(Notification::success("Access Granted"));
                self.show_dashboard().await
            }
            Err(e) => self.fail(e.to_string(), e),
        }
    }

    fn logout(&mut self) -> Outcome {
        match self.admin.logout() {
            Ok(()) => Outcome::LoggedOut,
            Err(e) => self.fail(e.to_string(), e),
        }
    }

    async fn show_dashboard(&mut self) -> Outcome {
        if !self.admin.is_logged_in() {
            return Outcome::LoginRequired;
        }
        if let Err(e) = self.admin.show_dashboard(&self.api).await {
            return self.fail(e.to_string(), e);
        }
        self.dashboard_or_login()
    }

    async fn post_job(&mut self, job: NewJob) -> Outcome {
        match self.admin.post_job(&self.api, &job).await {
            Ok(created) => {
                self.notifier
                    .notify(Notification::success("Job Listing Published"));
                Outcome::JobPosted(created)
            }
            Err(e @ ClientError::Validation(_)) => self.fail(e.to_string(), e),
            Err(e) => self.fail(format!("Failed to publish: {}", e), e),
        }
    }

    async fn update_job(&mut self, id: i64, update: JobUpdate) -> Outcome {
        match self.admin.update_job(&self.api, id, &update).await {
            Ok(()) => {
                self.notifier.notify(Notification::success("Listing Updated"));
                Outcome::JobUpdated(id)
            }
            Err(e) => self.fail(format!("Failed to update listing: {}", e), e),
        }
    }

    async fn delete_job(&mut self, id: i64) -> Outcome {
        match self
            .admin
            .delete_job(&self.api, &mut self.prompter, id)
            .await
        {
            Ok(DeleteOutcome::Deleted) => {
                self.notifier.notify(Notification::success("Listing Removed"));
                Outcome::JobDeleted(id)
            }
            Ok(DeleteOutcome::Cancelled) => Outcome::DeleteCancelled(id),
            Err(e) => self.fail(format!("Failed to delete listing: {}", e), e),
        }
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::LoadJobs => "load_jobs",
        Command::Search(_) => "search",
        Command::OpenApply { .. } => "open_apply",
        Command::SubmitApplication(_) => "submit_application",
        Command::CloseApply => "close_apply",
        Command::Login(_) => "login",
        Command::Logout => "logout",
        Command::ShowDashboard => "show_dashboard",
        Command::ShowTab(_) => "show_tab",
        Command::RefreshStats => "refresh_stats",
        Command::PostJob(_) => "post_job",
        Command::UpdateJob { .. } => "update_job",
        Command::DeleteJob(_) => "delete_job",
    }
}
