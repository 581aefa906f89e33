// src/apply/submitter.rs
//! Collects an applicant's details for one job and posts them

use crate::app_log;
use crate::core::{InFlight, JobBoardApi};
use crate::error::{ClientError, Result};
use crate::prompt::Prompter;
use crate::types::Application;

/// How applicant details are gathered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputVariant {
    /// A form filled in one go; phone is optional.
    #[default]
    Modal,
    /// One question at a time; phone is required.
    Prompt,
}

impl InputVariant {
    pub fn requires_phone(&self) -> bool {
        matches!(self, Self::Prompt)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: u32,
    pub resume_url: String,
    pub cover_letter: String,
    pub skills: String,
}

impl ApplyForm {
    fn into_application(self, job_id: i64) -> Application {
        Application {
            job_id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            experience: self.experience,
            resume_url: non_empty(self.resume_url),
            cover_letter: non_empty(self.cover_letter),
            skills: non_empty(self.skills),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// The open input surface: which job is targeted and what has been typed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplySurface {
    pub job_id: i64,
    pub job_title: String,
    pub form: ApplyForm,
}

#[derive(Debug, Default)]
pub struct ApplicationSubmitter {
    variant: InputVariant,
    surface: Option<ApplySurface>,
    in_flight: bool,
}

impl ApplicationSubmitter {
    pub fn new(variant: InputVariant) -> Self {
        Self {
            variant,
            surface: None,
            in_flight: false,
        }
    }

    pub fn variant(&self) -> InputVariant {
        self.variant
    }

    pub fn surface(&self) -> Option<&ApplySurface> {
        self.surface.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.surface.is_some()
    }

    /// The submit control is disabled while a submission is outstanding.
    pub fn submit_enabled(&self) -> bool {
        self.is_open() && !self.in_flight
    }

    /// Target `job_id` for the next submission and open an empty form.
    pub fn open_apply(&mut self, job_id: i64, job_title: &str) -> &ApplySurface {
        app_log!(debug, "Opening application for job {} ({})", job_id, job_title);
        self.surface.insert(ApplySurface {
            job_id,
            job_title: job_title.to_string(),
            form: ApplyForm::default(),
        })
    }

    pub fn close(&mut self) {
        self.surface = None;
    }

    pub fn fill(&mut self, form: ApplyForm) -> Result<()> {
        let surface = self.surface.as_mut().ok_or_else(no_job_selected)?;
        surface.form = form;
        Ok(())
    }

    /// Ask for each field in turn. A cancelled required question abandons the
    /// flow; cancelling an optional one leaves it blank.
    pub fn collect<P: Prompter>(&mut self, prompter: &mut P) -> Result<Option<ApplyForm>> {
        let title = self
            .surface
            .as_ref()
            .ok_or_else(no_job_selected)?
            .job_title
            .clone();

        let Some(name) = prompter.ask(&format!("Applying for {}. Your full name", title)) else {
            return Ok(None);
        };
        let Some(email) = prompter.ask("Email address") else {
            return Ok(None);
        };
        let Some(phone) = prompter.ask("Phone number") else {
            return Ok(None);
        };
        let experience = prompter
            .ask("Years of experience")
            .and_then(|years| years.trim().parse::<u32>().ok())
            .unwrap_or(0);
        let resume_url = prompter.ask("Resume URL (optional)").unwrap_or_default();
        let skills = prompter.ask("Key skills (optional)").unwrap_or_default();
        let cover_letter = prompter.ask("Cover letter (optional)").unwrap_or_default();

        let form = ApplyForm {
            name,
            email,
            phone,
            experience,
            resume_url,
            cover_letter,
            skills,
        };
        self.fill(form.clone())?;
        Ok(Some(form))
    }

    /// Validate and post the current form. Success closes the surface; any failure
    /// leaves it open with the form intact.
    pub async fn submit<A: JobBoardApi>(&mut self, api: &A) -> Result<i64> {
        if self.in_flight {
            return Err(ClientError::Validation(
                "An application is already being submitted".into(),
            ));
        }

        let surface = self.surface.as_ref().ok_or_else(no_job_selected)?;
        let job_id = surface.job_id;
        let application = surface.form.clone().into_application(job_id);
        application.validate(self.variant.requires_phone())?;

        let result = {
            let _busy = InFlight::start(&mut self.in_flight);
            api.apply(&application).await
        };

        match result {
            Ok(()) => {
                app_log!(info, "Application submitted for job {}", job_id);
                self.surface = None;
                Ok(job_id)
            }
            Err(e) => {
                app_log!(error, "Application for job {} failed: {}", job_id, e);
                Err(e)
            }
        }
    }
}

fn no_job_selected() -> ClientError {
    ClientError::Validation("No job selected".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;

    #[test]
    fn test_open_apply_records_target() {
        let mut submitter = ApplicationSubmitter::new(InputVariant::Modal);
        assert!(!submitter.submit_enabled());

        let surface = submitter.open_apply(9, "Engineer");
        assert_eq!(surface.job_id, 9);
        assert_eq!(surface.form, ApplyForm::default());
        assert!(submitter.submit_enabled());

        submitter.close();
        assert!(!submitter.is_open());
    }

    #[test]
    fn test_fill_requires_open_surface() {
        let mut submitter = ApplicationSubmitter::default();
        assert!(submitter.fill(ApplyForm::default()).is_err());
    }

    #[test]
    fn test_collect_from_prompts() {
        let mut submitter = ApplicationSubmitter::new(InputVariant::Prompt);
        submitter.open_apply(2, "Designer");

        let mut prompter =
            ScriptedPrompter::new(["Ada", "ada@example.com", "555", "x", "", "rust"]);
        let form = submitter.collect(&mut prompter).unwrap().unwrap();
        assert_eq!(form.name, "Ada");
        assert_eq!(form.experience, 0);
        assert_eq!(form.skills, "rust");
        assert!(prompter.asked[0].contains("Designer"));
        assert_eq!(submitter.surface().unwrap().form, form);
    }

    #[test]
    fn test_collect_cancelled() {
        let mut submitter = ApplicationSubmitter::new(InputVariant::Prompt);
        submitter.open_apply(2, "Designer");

        let mut prompter = ScriptedPrompter::new(["Ada"]).cancel_next();
        assert_eq!(submitter.collect(&mut prompter).unwrap(), None);
        assert_eq!(submitter.surface().unwrap().form, ApplyForm::default());
    }

    #[test]
    fn test_blank_optional_fields_dropped() {
        let form = ApplyForm {
            name: " Ada ".into(),
            email: "ada@example.com".into(),
            resume_url: "   ".into(),
            ..ApplyForm::default()
        };
        let app = form.into_application(4);
        assert_eq!(app.name, "Ada");
        assert_eq!(app.job_id, 4);
        assert_eq!(app.resume_url, None);
    }
}
