// src/core/service_client.rs
//! HTTP client for the job board API - JSON in, JSON out

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::app_log;
use crate::core::api::{CapabilityToken, JobBoardApi};
use crate::core::config_manager::{normalize_base_url, ApiConfig};
use crate::error::{ClientError, Result};
use crate::types::{
    ApiErrorBody, Application, ApplicationRecord, CreatedJob, HealthStatus, Job, JobUpdate,
    NewJob, Stats,
};

const JOBS_ENDPOINT: &str = "/jobs";
const ALL_JOBS_ENDPOINT: &str = "/jobs/all";
const STATS_ENDPOINT: &str = "/stats";
const APPLICATIONS_ENDPOINT: &str = "/applications";

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
    capability_header: String,
}

impl ServiceClient {
    /// Create new service client with configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&config.base_url),
            capability_header: config.capability_header.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn request(
        &self,
        method: Method,
        endpoint: &str,
        token: Option<&CapabilityToken>,
    ) -> RequestBuilder {
        let url = self.url(endpoint);
        app_log!(trace, "{} {}", method, url);

        let builder = self.client.request(method, &url);
        match token {
            Some(token) => builder.header(self.capability_header.as_str(), token.expose()),
            None => builder,
        }
    }

    /// Send and decode a JSON body from a 2xx response
    async fn send_json<R>(&self, builder: RequestBuilder) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = Self::send(builder).await?;
        response
            .json::<R>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Send and discard the body of a 2xx response
    async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        Self::send(builder).await.map(|_| ())
    }

    async fn send(builder: RequestBuilder) -> Result<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        app_log!(trace, "Response status: {}", status);

        if status.is_success() {
            Ok(response)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    /// Prefer the server's `{"error": ...}` message, fall back to the status code
    async fn error_from(response: Response) -> ClientError {
        let status = response.status().as_u16();
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| format!("HTTP {}", status));

        app_log!(warn, "API error {}: {}", status, message);
        ClientError::http(status, message)
    }

    /// `GET /health`, which lives next to the API rather than under it
    pub async fn health(&self) -> Result<HealthStatus> {
        let root = self
            .base_url
            .strip_suffix("/api")
            .unwrap_or(&self.base_url)
            .to_string();
        let url = format!("{}/health", root);
        app_log!(trace, "GET {}", url);
        self.send_json(self.client.get(&url)).await
    }
}

impl JobBoardApi for ServiceClient {
    async fn list_jobs(&self) -> Result<Vec<Job>> {
        self.send_json(self.request(Method::GET, JOBS_ENDPOINT, None))
            .await
    }

    async fn list_all_jobs(&self, token: &CapabilityToken) -> Result<Vec<Job>> {
        self.send_json(self.request(Method::GET, ALL_JOBS_ENDPOINT, Some(token)))
            .await
    }

    async fn create_job(&self, token: &CapabilityToken, job: &NewJob) -> Result<CreatedJob> {
        let builder = self
            .request(Method::POST, JOBS_ENDPOINT, Some(token))
            .json(job);
        self.send_json(builder).await
    }

    async fn update_job(
        &self,
        token: &CapabilityToken,
        id: i64,
        update: &JobUpdate,
    ) -> Result<()> {
        let endpoint = format!("{}/{}", JOBS_ENDPOINT, id);
        let builder = self
            .request(Method::PUT, &endpoint, Some(token))
            .json(update);
        self.send_empty(builder).await
    }

    async fn delete_job(&self, token: &CapabilityToken, id: i64) -> Result<()> {
        let endpoint = format!("{}/{}", JOBS_ENDPOINT, id);
        self.send_empty(self.request(Method::DELETE, &endpoint, Some(token)))
            .await
    }

    async fn apply(&self, application: &Application) -> Result<()> {
        let endpoint = format!("{}/{}/apply", JOBS_ENDPOINT, application.job_id);
        let builder = self.request(Method::POST, &endpoint, None).json(application);
        self.send_empty(builder).await
    }

    async fn stats(&self, token: &CapabilityToken) -> Result<Stats> {
        self.send_json(self.request(Method::GET, STATS_ENDPOINT, Some(token)))
            .await
    }

    async fn applications(&self, token: &CapabilityToken) -> Result<Vec<ApplicationRecord>> {
        self.send_json(self.request(Method::GET, APPLICATIONS_ENDPOINT, Some(token)))
            .await
    }
}
