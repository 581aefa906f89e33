// src/types/job.rs
//! Job records as served by the listing endpoints, and the payloads used to create or edit them

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::types::null_as_default;

pub const SALARY_FALLBACK: &str = "Negotiable";

fn default_active() -> bool {
    true
}

fn null_as_active<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub posted_date: Option<NaiveDateTime>,
    #[serde(default = "default_active", deserialize_with = "null_as_active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub application_count: u32,
}

impl Job {
    /// Salary as shown to job seekers; blank or missing becomes "Negotiable".
    pub fn salary_display(&self) -> &str {
        match self.salary.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => SALARY_FALLBACK,
        }
    }

    pub fn posted_on(&self) -> String {
        self.posted_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// Body of `POST /jobs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub category: String,
    pub job_type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl NewJob {
    /// The server rejects a job without these fields.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("title", &self.title),
            ("company", &self.company),
            ("location", &self.location),
            ("description", &self.description),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ClientError::Validation(format!(
                "Please fill in: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Body of `PUT /jobs/{id}`. Absent fields are left as they are on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl JobUpdate {
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
