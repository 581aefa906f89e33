// src/admin/panels.rs
//! Read-only admin views: the jobs table, the stats counters and the applications list

use crate::app_log;
use crate::core::{CapabilityToken, JobBoardApi};
use crate::error::{ClientError, Result};
use crate::listing::RenderTarget;
use crate::types::{ApplicationRecord, Job, Stats};

#[derive(Debug, Default)]
pub struct JobTable {
    jobs: Vec<Job>,
}

impl JobTable {
    /// Reload every job, inactive ones included.
    pub async fn load<A: JobBoardApi>(&mut self, api: &A, token: &CapabilityToken) -> Result<()> {
        self.jobs = api.list_all_jobs(token).await?;
        app_log!(debug, "Jobs table holds {} rows", self.jobs.len());
        Ok(())
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn find(&self, id: i64) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn rows(&self, target: RenderTarget) -> Vec<String> {
        self.jobs.iter().map(|job| target.job_row(job)).collect()
    }
}

#[derive(Debug, Default)]
pub struct StatsPanel {
    stats: Option<Stats>,
}

impl StatsPanel {
    pub async fn load<A: JobBoardApi>(&mut self, api: &A, token: &CapabilityToken) -> Result<&Stats> {
        let stats = api.stats(token).await?;
        Ok(self.stats.insert(stats))
    }

    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }
}

#[derive(Debug, Default)]
pub struct ApplicationsPanel {
    records: Vec<ApplicationRecord>,
}

impl ApplicationsPanel {
    pub async fn load<A: JobBoardApi>(&mut self, api: &A, token: &CapabilityToken) -> Result<()> {
        self.records = api.applications(token).await?;
        Ok(())
    }

    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }

    pub fn rows(&self, target: RenderTarget) -> Vec<String> {
        self.records
            .iter()
            .map(|record| target.application_row(record))
            .collect()
    }

    /// Export the loaded applications as CSV, one row per application.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "id", "job_id", "name", "email", "phone", "experience", "skills", "status",
                "applied_date",
            ])
            .map_err(csv_error)?;

        for record in &self.records {
            writer
                .write_record([
                    record.id.to_string(),
                    record.job_id.to_string(),
                    record.name.clone(),
                    record.email.clone(),
                    record.phone.clone(),
                    record.experience.to_string(),
                    record.skills.clone().unwrap_or_default(),
                    record.status.clone(),
                    record
                        .applied_date
                        .map(|d| d.format("%Y-%m-%dT%H:%M:%S").to_string())
                        .unwrap_or_default(),
                ])
                .map_err(csv_error)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ClientError::Storage(format!("Failed to finish CSV: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| ClientError::Storage(e.to_string()))
    }
}

fn csv_error(err: csv::Error) -> ClientError {
    ClientError::Storage(format!("Failed to write CSV: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_export_quotes_fields() {
        let panel = ApplicationsPanel {
            records: vec![ApplicationRecord {
                id: 1,
                job_id: 7,
                name: "Doe, Jane".into(),
                email: "jane@example.com".into(),
                phone: "555".into(),
                experience: 3,
                skills: Some("rust, sql".into()),
                status: "Pending".into(),
                applied_date: None,
            }],
        };

        let csv = panel.to_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("id,job_id,name,email,phone,experience,skills,status,applied_date")
        );
        assert_eq!(
            lines.next(),
            Some("1,7,\"Doe, Jane\",jane@example.com,555,3,\"rust, sql\",Pending,")
        );
    }
}
