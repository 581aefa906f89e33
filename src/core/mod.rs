// src/core/mod.rs
//! Configuration, the REST client and persisted client state

pub mod api;
pub mod config_manager;
mod in_flight;
pub mod service_client;
pub mod token_store;

pub use api::{CapabilityToken, JobBoardApi};
pub use config_manager::ConfigManager;
pub use service_client::ServiceClient;
pub use token_store::TokenStore;

pub(crate) use in_flight::InFlight;
