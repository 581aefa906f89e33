// src/listing/filter.rs
//! Client-side search over the loaded job collection

use crate::types::Job;

/// Search form values. A blank field places no constraint on the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Substring of title, company or description, any case
    pub text: String,
    /// Substring of location, any case
    pub location: String,
    /// Exact category
    pub category: String,
    /// Exact job type
    pub job_type: String,
}

impl SearchCriteria {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        [&self.text, &self.location, &self.category, &self.job_type]
            .iter()
            .all(|field| field.trim().is_empty())
    }

    pub fn matches(&self, job: &Job) -> bool {
        let text = self.text.trim().to_lowercase();
        let location = self.location.trim().to_lowercase();
        let category = self.category.trim();
        let job_type = self.job_type.trim();

        let text_ok = text.is_empty()
            || contains_ci(&job.title, &text)
            || contains_ci(&job.company, &text)
            || contains_ci(&job.description, &text);
        let location_ok = location.is_empty() || contains_ci(&job.location, &location);
        let category_ok = category.is_empty() || job.category == category;
        let job_type_ok = job_type.is_empty() || job.job_type == job_type;

        text_ok && location_ok && category_ok && job_type_ok
    }
}

/// `needle` is already lowercase.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Jobs matching `criteria`, in their original order.
pub fn filter<'a>(jobs: &'a [Job], criteria: &SearchCriteria) -> Vec<&'a Job> {
    jobs.iter().filter(|job| criteria.matches(job)).collect()
}

/// Jobs matching every set of criteria, in their original order.
pub fn filter_all<'a>(jobs: &'a [Job], criteria: &[SearchCriteria]) -> Vec<&'a Job> {
    jobs.iter()
        .filter(|job| criteria.iter().all(|c| c.matches(job)))
        .collect()
}
