// src/admin/mod.rs
//! Admin surface: post, update and delete jobs; stats and applications panels

pub mod dashboard;
pub mod panels;
pub mod poster;

pub use dashboard::{AdminDashboard, AdminTab, DashboardView, DeleteOutcome};
pub use panels::{ApplicationsPanel, JobTable, StatsPanel};
pub use poster::JobPoster;
