// src/types/application.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::types::null_as_default;

/// Body of `POST /jobs/{id}/apply`. The job id travels in the path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(skip)]
    pub job_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
}

impl Application {
    /// Name and email are always required; the prompt flow also insists on a phone number.
    pub fn validate(&self, require_phone: bool) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ClientError::Validation("Name is required".into()));
        }
        if self.email.trim().is_empty() {
            return Err(ClientError::Validation("Email is required".into()));
        }
        if require_phone && self.phone.trim().is_empty() {
            return Err(ClientError::Validation("Phone is required".into()));
        }
        Ok(())
    }
}

/// One row of `GET /applications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: i64,
    pub job_id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: u32,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub applied_date: Option<NaiveDateTime>,
}

impl ApplicationRecord {
    pub fn applied_on(&self) -> String {
        self.applied_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}
