pub mod application;
pub mod job;
pub mod response;

use serde::{Deserialize, Deserializer};

pub use application::{Application, ApplicationRecord};
pub use job::{Job, JobUpdate, NewJob, SALARY_FALLBACK};
pub use response::{
    ApiErrorBody, CreatedJob, HealthStatus, StatusBreakdown, Stats,
};

/// Treat an explicit JSON `null` like a missing key. The API stores whatever clients send,
/// so a single null field must not fail the whole list.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
