// src/listing/render.rs
//! Projections of jobs, applications and stats into HTML markup or terminal text

use crate::types::{ApplicationRecord, Job, Stats};

pub const NO_RESULTS_MESSAGE: &str = "No jobs found matching your criteria";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderTarget {
    /// Markup for a job grid container
    Html,
    /// Plain text for a terminal
    #[default]
    Text,
}

/// What the listing area shows: either the grid or the placeholder, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingView {
    NoResults { placeholder: String },
    Grid { cards: Vec<String> },
}

impl ListingView {
    pub fn grid_visible(&self) -> bool {
        matches!(self, Self::Grid { .. })
    }

    pub fn placeholder_visible(&self) -> bool {
        matches!(self, Self::NoResults { .. })
    }

    pub fn card_count(&self) -> usize {
        match self {
            Self::NoResults { .. } => 0,
            Self::Grid { cards } => cards.len(),
        }
    }

    pub fn to_markup(&self, target: RenderTarget) -> String {
        match self {
            Self::NoResults { placeholder } => placeholder.clone(),
            Self::Grid { cards } => match target {
                RenderTarget::Html => format!("<div class=\"jobs-grid\">\n{}</div>\n", cards.concat()),
                RenderTarget::Text => cards.join("\n"),
            },
        }
    }
}

impl RenderTarget {
    /// Project `jobs` into a view. The input is only read.
    pub fn render<'a, I>(&self, jobs: I) -> ListingView
    where
        I: IntoIterator<Item = &'a Job>,
    {
        let cards: Vec<String> = jobs.into_iter().map(|job| self.card(job)).collect();
        if cards.is_empty() {
            ListingView::NoResults {
                placeholder: self.no_results(),
            }
        } else {
            ListingView::Grid { cards }
        }
    }

    pub fn no_results(&self) -> String {
        match self {
            Self::Html => format!("<div class=\"no-results\">{}</div>\n", NO_RESULTS_MESSAGE),
            Self::Text => NO_RESULTS_MESSAGE.to_string(),
        }
    }

    pub fn card(&self, job: &Job) -> String {
        match self {
            Self::Html => format!(
                r#"<div class="job-card" data-job-id="{id}">
  <h3 class="job-title">{title}</h3>
  <p class="job-company">{company}</p>
  <div class="job-meta">
    <span class="job-location">{location}</span>
    <span class="job-type">{job_type}</span>
    <span class="job-category">{category}</span>
    <span class="job-salary">{salary}</span>
  </div>
  <p class="job-description">{description}</p>
  <div class="job-footer">
    <span class="job-date">{posted}</span>
    <button class="btn btn-primary apply-btn" data-job-id="{id}" data-job-title="{title}">Apply Now</button>
  </div>
</div>
"#,
                id = job.id,
                title = escape_html(&job.title),
                company = escape_html(&job.company),
                location = escape_html(&job.location),
                job_type = escape_html(&job.job_type),
                category = escape_html(&job.category),
                salary = escape_html(job.salary_display()),
                description = escape_html(&job.description),
                posted = job.posted_on(),
            ),
            Self::Text => {
                let mut card = format!(
                    "[{}] {} @ {}\n    {} | {} | {} | {}\n",
                    job.id,
                    job.title,
                    job.company,
                    job.location,
                    job.job_type,
                    job.category,
                    job.salary_display()
                );
                if !job.description.is_empty() {
                    card.push_str(&format!("    {}\n", job.description));
                }
                if job.posted_date.is_some() {
                    card.push_str(&format!("    Posted {}\n", job.posted_on()));
                }
                card
            }
        }
    }

    /// Row of the admin jobs table
    pub fn job_row(&self, job: &Job) -> String {
        match self {
            Self::Html => format!(
                r#"<tr data-job-id="{id}">
  <td class="job-title">{title}</td>
  <td>{category}</td>
  <td><span class="badge">{job_type}</span></td>
  <td>{count} Candidates</td>
  <td><button class="btn btn-outline delete-btn" data-job-id="{id}">Delete</button></td>
</tr>
"#,
                id = job.id,
                title = escape_html(&job.title),
                category = escape_html(&job.category),
                job_type = escape_html(&job.job_type),
                count = job.application_count,
            ),
            Self::Text => format!(
                "{:<6} {:<30} {:<15} {:<12} {:>3} Candidates{}",
                job.id,
                job.title,
                job.category,
                job.job_type,
                job.application_count,
                if job.is_active { "" } else { "  (inactive)" }
            ),
        }
    }

    /// Row of the admin applications table
    pub fn application_row(&self, record: &ApplicationRecord) -> String {
        match self {
            Self::Html => format!(
                r#"<tr data-application-id="{id}">
  <td class="applicant-name">{name}</td>
  <td>{email}</td>
  <td>{experience} Years</td>
  <td>{applied}</td>
  <td><span class="badge badge-pending">{status}</span></td>
</tr>
"#,
                id = record.id,
                name = escape_html(&record.name),
                email = escape_html(&record.email),
                experience = record.experience,
                applied = record.applied_on(),
                status = escape_html(&status_label(record)),
            ),
            Self::Text => format!(
                "{:<25} {:<30} {:>2} Years  {:<10}  {}",
                record.name,
                record.email,
                record.experience,
                record.applied_on(),
                status_label(record)
            ),
        }
    }

    pub fn stats(&self, stats: &Stats) -> String {
        match self {
            Self::Html => {
                let mut html = format!(
                    r#"<div class="stats">
  <div class="stat"><span id="totalJobs">{}</span> Total Jobs</div>
  <div class="stat"><span id="activeJobs">{}</span> Active Jobs</div>
  <div class="stat"><span id="totalApps">{}</span> Applications</div>
"#,
                    stats.total_jobs, stats.active_jobs, stats.total_applications
                );
                if let Some(pending) = stats.pending() {
                    html.push_str(&format!(
                        "  <div class=\"stat\"><span id=\"pendingApps\">{}</span> Pending</div>\n",
                        pending
                    ));
                }
                html.push_str("</div>\n");
                html
            }
            Self::Text => {
                let mut text = format!(
                    "Total jobs: {}\nActive jobs: {}\nApplications: {}",
                    stats.total_jobs, stats.active_jobs, stats.total_applications
                );
                if let Some(pending) = stats.pending() {
                    text.push_str(&format!("\nPending review: {}", pending));
                }
                text
            }
        }
    }
}

fn status_label(record: &ApplicationRecord) -> String {
    match record.status.as_str() {
        "" | "Pending" => "Pending Review".to_string(),
        other => other.to_string(),
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatusBreakdown;

    fn job() -> Job {
        Job {
            id: 42,
            title: "Engineer".into(),
            company: "Acme".into(),
            location: "Berlin".into(),
            salary: Some(String::new()),
            category: "IT".into(),
            job_type: "Full-time".into(),
            description: "Build & ship".into(),
            requirements: None,
            benefits: None,
            posted_date: None,
            is_active: true,
            application_count: 3,
        }
    }

    #[test]
    fn test_empty_renders_placeholder() {
        let view = RenderTarget::Text.render(&Vec::<Job>::new());
        assert!(view.placeholder_visible());
        assert!(!view.grid_visible());
        assert_eq!(view.card_count(), 0);
        assert_eq!(view.to_markup(RenderTarget::Text), NO_RESULTS_MESSAGE);
    }

    #[test]
    fn test_text_card_is_verbatim() {
        let jobs = [job()];
        let view = RenderTarget::Text.render(&jobs);
        assert!(view.grid_visible());
        assert_eq!(view.card_count(), 1);

        let markup = view.to_markup(RenderTarget::Text);
        assert!(markup.starts_with("[42] Engineer @ Acme\n"));
        assert!(markup.contains("Berlin | Full-time | IT | Negotiable"));
        assert!(markup.contains("Build & ship"));
    }

    #[test]
    fn test_html_escapes_fields() {
        let mut j = job();
        j.title = "<script>alert(1)</script>".into();
        let card = RenderTarget::Html.card(&j);
        assert!(!card.contains("<script>"));
        assert!(card.contains("&lt;script&gt;"));
        assert!(card.contains("Build &amp; ship"));
    }

    #[test]
    fn test_admin_rows() {
        let row = RenderTarget::Text.job_row(&job());
        assert!(row.contains("3 Candidates"));
        assert!(!row.contains("inactive"));

        let record = ApplicationRecord {
            id: 1,
            job_id: 42,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: String::new(),
            experience: 5,
            skills: None,
            status: "Pending".into(),
            applied_date: None,
        };
        let row = RenderTarget::Html.application_row(&record);
        assert!(row.contains("5 Years"));
        assert!(row.contains("Pending Review"));
    }

    #[test]
    fn test_stats_shows_pending_when_present() {
        let mut stats = Stats {
            total_jobs: 4,
            active_jobs: 3,
            total_applications: 9,
            applications_by_status: None,
        };
        assert!(!RenderTarget::Text.stats(&stats).contains("Pending"));

        stats.applications_by_status = Some(StatusBreakdown { pending: 2 });
        assert!(RenderTarget::Text.stats(&stats).ends_with("Pending review: 2"));
    }
}
