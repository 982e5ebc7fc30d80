//! reqwest-backed implementation of the jobs resource.

use board_core::{Job, JobDraft, JobId};
use reqwest::{Client, Response};

use crate::jobs::{ErrorBody, SaveResponse};
use crate::{ApiConfig, ApiError, ApiFuture, ApiResult, JobPayload, JobsApi, ListQuery};

const LIST_FAILED: &str = "Failed to fetch jobs";
const GET_FAILED: &str = "Failed to fetch job";
const CREATE_FAILED: &str = "Failed to create job";
const UPDATE_FAILED: &str = "Failed to update job";
const DELETE_FAILED: &str = "Failed to delete job";
const OPTIONS_FAILED: &str = "Failed to fetch filter options";

/// HTTP client for the jobs REST resource.
#[derive(Debug, Clone)]
pub struct HttpJobsApi {
    client: Client,
    config: ApiConfig,
}

impl HttpJobsApi {
    /// Create a client for the given config.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        reqwest::Url::parse(&config.base_url)
            .map_err(|e| ApiError::Config(format!("invalid base url '{}': {}", config.base_url, e)))?;

        #[allow(unused_mut)]
        let mut builder = Client::builder();

        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(timeout) = config.timeout {
                builder = builder.timeout(timeout);
            }
        }

        let client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build http client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ApiConfig::from_env()?)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn fetch_jobs(&self, query: &ListQuery, fallback: &'static str) -> ApiResult<Vec<Job>> {
        let url = self.config.jobs_url();
        let pairs = query.to_pairs();
        tracing::debug!(%url, ?pairs, "GET jobs");

        let response = self.client.get(&url).query(&pairs).send().await?;
        let response = ensure_success(response, fallback).await?;
        Ok(response.json::<Vec<Job>>().await?)
    }

    async fn save(
        &self,
        request: reqwest::RequestBuilder,
        payload: &JobPayload<'_>,
        fallback: &'static str,
    ) -> ApiResult<Option<Job>> {
        let response = request.json(payload).send().await?;
        let response = ensure_success(response, fallback).await?;

        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(None);
        }
        match serde_json::from_slice::<SaveResponse>(&body)? {
            SaveResponse::Saved(job) => Ok(Some(job)),
            SaveResponse::Acknowledged { message } => {
                tracing::debug!(%message, "write acknowledged without a record");
                Ok(None)
            }
        }
    }
}

/// Turn a non-success response into [`ApiError::Status`], preferring the
/// server's own `error` message over the fallback.
async fn ensure_success(response: Response, fallback: &'static str) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(ErrorBody {
            error: Some(message),
        }) if !message.trim().is_empty() => message,
        _ => fallback.to_string(),
    };

    tracing::warn!(status = status.as_u16(), %message, "jobs request rejected");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

impl JobsApi for HttpJobsApi {
    fn list<'a>(&'a self, query: &'a ListQuery) -> ApiFuture<'a, Vec<Job>> {
        Box::pin(self.fetch_jobs(query, LIST_FAILED))
    }

    fn get<'a>(&'a self, id: &'a JobId) -> ApiFuture<'a, Job> {
        Box::pin(async move {
            let url = self.config.job_url(id.as_str())?;
            tracing::debug!(%url, "GET job");

            let response = self.client.get(url).send().await?;
            let response = ensure_success(response, GET_FAILED).await?;
            Ok(response.json::<Job>().await?)
        })
    }

    fn create<'a>(&'a self, draft: &'a JobDraft) -> ApiFuture<'a, Option<Job>> {
        Box::pin(async move {
            let url = self.config.jobs_url();
            tracing::debug!(%url, title = %draft.title, "POST job");

            let payload = JobPayload::for_create(draft);
            self.save(self.client.post(&url), &payload, CREATE_FAILED)
                .await
        })
    }

    fn update<'a>(&'a self, id: &'a JobId, draft: &'a JobDraft) -> ApiFuture<'a, Option<Job>> {
        Box::pin(async move {
            let url = self.config.job_url(id.as_str())?;
            tracing::debug!(%url, "PUT job");

            let payload = JobPayload::for_update(draft);
            self.save(self.client.put(url), &payload, UPDATE_FAILED)
                .await
        })
    }

    fn delete<'a>(&'a self, id: &'a JobId) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let url = self.config.job_url(id.as_str())?;
            tracing::debug!(%url, "DELETE job");

            let response = self.client.delete(url).send().await?;
            ensure_success(response, DELETE_FAILED).await?;
            Ok(())
        })
    }

    fn fetch_all(&self) -> ApiFuture<'_, Vec<Job>> {
        Box::pin(self.fetch_jobs(&UNFILTERED, OPTIONS_FAILED))
    }
}

static UNFILTERED: ListQuery = ListQuery {
    job_type: None,
    location: None,
    tag: None,
    sort: None,
};
