use anyhow::{Context, Result};
use clap::Parser;
use job_board::app_log;
use job_board::cli::{handle_command, Cli};
use job_board::core::ConfigManager;
use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// HTTP stack crates are only interesting when something breaks.
const DEFAULT_LOG_FILTERS: &[&str] = &[
    "hyper=warn",
    "hyper_util=warn",
    "reqwest=warn",
    "rustls=warn",
];

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigManager::load()?;

    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    for rule in DEFAULT_LOG_FILTERS {
        filter = filter.add_directive(rule.parse().context("Invalid default log directive")?);
    }

    // JSON to the configured log file, otherwise human-readable on stderr.
    let file_layer = match &config.logging.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file))
                    .with_current_span(false)
                    .with_span_list(false),
            )
        }
        None => None,
    };
    let stderr_layer = if file_layer.is_none() {
        Some(fmt::layer().with_writer(std::io::stderr).with_target(false))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    app_log!(
        info,
        "Loaded client configuration for environment: {}",
        config.environment
    );

    if !handle_command(cli, config).await? {
        std::process::exit(1);
    }
    Ok(())
}
