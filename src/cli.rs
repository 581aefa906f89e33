// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::admin::AdminTab;
use crate::app::{App, Command, Outcome};
use crate::app_log;
use crate::apply::{ApplyForm, InputVariant};
use crate::core::{ConfigManager, ServiceClient, TokenStore};
use crate::listing::{RenderTarget, SearchCriteria};
use crate::notify::ConsoleNotifier;
use crate::prompt::StdinPrompter;
use crate::types::{JobUpdate, NewJob};

#[derive(Parser)]
#[command(name = "job-board")]
#[command(version, about = "Browse, search and apply for jobs; manage listings as admin")]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Base URL of the job board API, e.g. http://localhost:5000/api
    #[arg(global = true, long, env = "JOB_BOARD_API_URL")]
    pub api_url: Option<String>,

    /// File holding the stored admin credential
    #[arg(global = true, long, env = "JOB_BOARD_STATE_PATH")]
    pub state_path: Option<PathBuf>,

    #[arg(global = true, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
}

impl From<OutputFormat> for RenderTarget {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => RenderTarget::Text,
            OutputFormat::Html => RenderTarget::Html,
        }
    }
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// List open jobs, optionally filtered
    Jobs(SearchArgs),
    /// Apply for a job
    Apply(ApplyArgs),
    /// Check the API is up
    Health,
    /// Admin dashboard
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Matches title, company or description
    #[arg(short, long, default_value = "")]
    pub text: String,
    #[arg(short, long, default_value = "")]
    pub location: String,
    #[arg(short, long, default_value = "")]
    pub category: String,
    #[arg(short = 'j', long, default_value = "")]
    pub job_type: String,
}

impl From<SearchArgs> for SearchCriteria {
    fn from(args: SearchArgs) -> Self {
        SearchCriteria {
            text: args.text,
            location: args.location,
            category: args.category,
            job_type: args.job_type,
        }
    }
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    pub job_id: i64,
    /// Ask for each field interactively instead of taking flags
    #[arg(long)]
    pub prompt: bool,
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value_t = 0)]
    pub experience: u32,
    #[arg(long, default_value = "")]
    pub resume_url: String,
    #[arg(long, default_value = "")]
    pub cover_letter: String,
    #[arg(long, default_value = "")]
    pub skills: String,
}

impl ApplyArgs {
    fn form(&self) -> ApplyForm {
        ApplyForm {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            experience: self.experience,
            resume_url: self.resume_url.clone(),
            cover_letter: self.cover_letter.clone(),
            skills: self.skills.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Store an access key after the server accepts it
    Login { key: String },
    /// Forget the stored access key
    Logout,
    /// Stats, jobs table and applications
    Dashboard {
        #[arg(long, value_enum, default_value_t = TabArg::Jobs)]
        tab: TabArg,
    },
    /// Stats counters only
    Stats,
    /// Publish a new job
    Post(PostArgs),
    /// Delete a job (asks for confirmation)
    Delete {
        id: i64,
        /// Skip the confirmation question
        #[arg(short, long)]
        yes: bool,
    },
    /// Show a job on the public listing again
    Activate { id: i64 },
    /// Hide a job from the public listing
    Deactivate { id: i64 },
    /// List applications
    Applications {
        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TabArg {
    Jobs,
    Applications,
}

impl From<TabArg> for AdminTab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::Jobs => AdminTab::Jobs,
            TabArg::Applications => AdminTab::Applications,
        }
    }
}

#[derive(Args, Debug)]
pub struct PostArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub company: String,
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub description: String,
    #[arg(long, default_value = "")]
    pub salary: String,
    #[arg(long, default_value = "Other")]
    pub category: String,
    #[arg(long, default_value = "Full-time")]
    pub job_type: String,
    #[arg(long)]
    pub requirements: Option<String>,
    #[arg(long)]
    pub benefits: Option<String>,
}

impl From<PostArgs> for NewJob {
    fn from(args: PostArgs) -> Self {
        NewJob {
            title: args.title,
            company: args.company,
            location: args.location,
            salary: args.salary,
            category: args.category,
            job_type: args.job_type,
            description: args.description,
            requirements: args.requirements,
            benefits: args.benefits,
            is_active: None,
        }
    }
}

type CliApp = App<ServiceClient, ConsoleNotifier, StdinPrompter>;

/// Run one CLI command. Returns `false` when the action failed; the user has
/// already been notified.
pub async fn handle_command(cli: Cli, mut config: ConfigManager) -> Result<bool> {
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url);
    }
    if let Some(path) = cli.state_path.clone() {
        config = config.with_state_path(path);
    }

    let target = RenderTarget::from(cli.format);
    let api = ServiceClient::new(&config.api).context("Failed to create API client")?;
    app_log!(debug, "Using API at {}", api.base_url());

    if let CliCommand::Health = cli.command {
        return match api.health().await {
            Ok(health) => {
                println!("{}", health.status);
                Ok(true)
            }
            Err(e) => {
                eprintln!("❌ API unreachable: {}", e);
                Ok(false)
            }
        };
    }

    let prompter = match &cli.command {
        CliCommand::Admin {
            command: AdminCommand::Delete { yes: true, .. },
        } => StdinPrompter::assume_yes(),
        _ => StdinPrompter::default(),
    };
    let store = TokenStore::new(config.storage.state_path.clone());
    let app = App::new(api, ConsoleNotifier, prompter, store)
        .context("Failed to read stored admin credential")?
        .with_target(target);

    match cli.command {
        CliCommand::Jobs(args) => run_jobs(app, args.into(), target).await,
        CliCommand::Apply(args) => run_apply(app, args).await,
        CliCommand::Health => Ok(true),
        CliCommand::Admin { command } => run_admin(app, command, target).await,
    }
}

async fn run_jobs(mut app: CliApp, criteria: SearchCriteria, target: RenderTarget) -> Result<bool> {
    if app.dispatch(Command::LoadJobs).await.is_failure() {
        return Ok(false);
    }

    let outcome = app.dispatch(Command::Search(criteria)).await;
    if let Outcome::Listing(view) = &outcome {
        println!("{}", view.to_markup(target));
    }
    Ok(!outcome.is_failure())
}

async fn run_apply(app: CliApp, args: ApplyArgs) -> Result<bool> {
    let variant = if args.prompt {
        InputVariant::Prompt
    } else {
        InputVariant::Modal
    };
    let mut app = app.with_variant(variant);

    // Only used to name the job in prompts.
    if variant == InputVariant::Prompt {
        app.preload_listing().await;
    }

    let outcome = app
        .dispatch(Command::OpenApply {
            job_id: args.job_id,
            job_title: None,
        })
        .await;

    let outcome = match outcome {
        Outcome::ApplyOpened { .. } => app.dispatch(Command::SubmitApplication(args.form())).await,
        other => other,
    };

    Ok(matches!(outcome, Outcome::ApplicationSubmitted { .. }))
}

async fn run_admin(mut app: CliApp, command: AdminCommand, target: RenderTarget) -> Result<bool> {
    let outcome = match command {
        AdminCommand::Login { key } => app.dispatch(Command::Login(key)).await,
        AdminCommand::Logout => app.dispatch(Command::Logout).await,
        AdminCommand::Dashboard { tab } => {
            app.dispatch(Command::ShowTab(tab.into())).await;
            app.dispatch(Command::ShowDashboard).await
        }
        AdminCommand::Stats => app.dispatch(Command::RefreshStats).await,
        AdminCommand::Post(args) => app.dispatch(Command::PostJob(args.into())).await,
        AdminCommand::Delete { id, .. } => app.dispatch(Command::DeleteJob(id)).await,
        AdminCommand::Activate { id } => {
            app.dispatch(Command::UpdateJob {
                id,
                update: JobUpdate::active(true),
            })
            .await
        }
        AdminCommand::Deactivate { id } => {
            app.dispatch(Command::UpdateJob {
                id,
                update: JobUpdate::active(false),
            })
            .await
        }
        AdminCommand::Applications { csv } => {
            app.dispatch(Command::ShowTab(AdminTab::Applications)).await;
            let outcome = app.dispatch(Command::ShowDashboard).await;
            if csv && matches!(outcome, Outcome::Dashboard(_)) {
                print!("{}", app.admin().applications().to_csv()?);
                return Ok(true);
            }
            outcome
        }
    };

    print_admin_outcome(&outcome, target);
    Ok(!outcome.is_failure())
}

fn print_admin_outcome(outcome: &Outcome, target: RenderTarget) {
    match outcome {
        Outcome::LoginRequired => {
            eprintln!("Not logged in. Run `job-board admin login <key>` first.");
        }
        Outcome::Dashboard(view) => {
            if let Some(stats) = &view.stats {
                println!("{}", stats);
            }
            let rows = match view.active_tab {
                AdminTab::Jobs => &view.job_rows,
                AdminTab::Applications => &view.application_rows,
            };
            if !rows.is_empty() {
                if target == RenderTarget::Text {
                    println!();
                }
                for row in rows {
                    println!("{}", row);
                }
            }
        }
        Outcome::JobPosted(created) => println!("Created job {}", created.id),
        Outcome::DeleteCancelled(id) => println!("Kept job {}", id),
        Outcome::LoggedOut => println!("Logged out"),
        _ => {}
    }
}
