//! Client for the job board REST API: public listing, search and apply, plus the
//! admin dashboard (post, update, delete, stats, applications).

pub mod admin;
pub mod app;
pub mod apply;
pub mod cli;
pub mod core;
pub mod error;
pub mod listing;
pub mod notify;
pub mod prompt;
pub mod types;

pub use error::{ClientError, Result};

/// Crate-wide logging entry point, forwards to the matching `tracing` macro.
///
/// ```ignore
/// app_log!(info, "Loaded {} jobs", jobs.len());
/// ```
#[macro_export]
macro_rules! app_log {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}
