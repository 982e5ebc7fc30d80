//! The jobs resource contract and its wire shapes.

use std::future::Future;
use std::pin::Pin;

use board_core::{DEFAULT_LINK, FilterOptions, FilterSelection, Job, JobDraft, JobId};
use serde::{Deserialize, Serialize};

use crate::ApiError;

/// Result type for transport calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Future type for async transport calls.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = ApiResult<T>> + Send + 'a>>;

/// One operation per REST interaction on the jobs resource.
///
/// Implement this trait to back the stores with a different transport
/// (an in-memory fake in tests, for instance).
pub trait JobsApi: Send + Sync + 'static {
    /// `GET /jobs` scoped by `query`.
    fn list<'a>(&'a self, query: &'a ListQuery) -> ApiFuture<'a, Vec<Job>>;

    /// `GET /jobs/{id}`.
    fn get<'a>(&'a self, id: &'a JobId) -> ApiFuture<'a, Job>;

    /// `POST /jobs`. `None` when the server only acknowledges the write.
    fn create<'a>(&'a self, draft: &'a JobDraft) -> ApiFuture<'a, Option<Job>>;

    /// `PUT /jobs/{id}`. `None` when the server only acknowledges the write.
    fn update<'a>(&'a self, id: &'a JobId, draft: &'a JobDraft) -> ApiFuture<'a, Option<Job>>;

    /// `DELETE /jobs/{id}`. Success is signalled by status alone.
    fn delete<'a>(&'a self, id: &'a JobId) -> ApiFuture<'a, ()>;

    /// `GET /jobs` with no narrowing, for deriving filter options.
    fn fetch_all(&self) -> ApiFuture<'_, Vec<Job>>;

    /// Distinct job types, locations and tags across the whole collection.
    fn filter_options(&self) -> ApiFuture<'_, FilterOptions> {
        Box::pin(async move {
            let jobs = self.fetch_all().await?;
            Ok(FilterOptions::from_jobs(&jobs))
        })
    }
}

/// Query parameters for a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub tag: Option<String>,
    pub sort: Option<&'static str>,
}

impl ListQuery {
    /// Translate a selection into query parameters.
    ///
    /// "All" choices are omitted, only the first selected tag is sent, and
    /// the keyword never leaves the client.
    pub fn from_selection(selection: &FilterSelection) -> Self {
        Self {
            job_type: selection.job_type.as_option().map(|t| t.as_str().to_string()),
            location: selection.location.as_option().cloned(),
            tag: selection.primary_tag().map(str::to_string),
            sort: Some(selection.sort.as_query_value()),
        }
    }

    /// Parameters in wire order, skipping absent ones.
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(job_type) = &self.job_type {
            pairs.push(("job_type", job_type.as_str()));
        }
        if let Some(location) = &self.location {
            pairs.push(("location", location.as_str()));
        }
        if let Some(tag) = &self.tag {
            pairs.push(("tag", tag.as_str()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort));
        }
        pairs
    }
}

impl From<&FilterSelection> for ListQuery {
    fn from(selection: &FilterSelection) -> Self {
        Self::from_selection(selection)
    }
}

/// Request body for create and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPayload<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub location: &'a str,
    pub posting_date: String,
    pub job_type: &'a str,
    pub tags: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<&'a str>,
}

impl<'a> JobPayload<'a> {
    /// Body for `POST /jobs`. A missing link is replaced by the placeholder.
    pub fn for_create(draft: &'a JobDraft) -> Self {
        let mut payload = Self::for_update(draft);
        payload.link = Some(draft.link.as_deref().unwrap_or(DEFAULT_LINK));
        payload
    }

    /// Body for `PUT /jobs/{id}`. A missing link is left out so the server keeps
    /// the stored one.
    pub fn for_update(draft: &'a JobDraft) -> Self {
        Self {
            title: &draft.title,
            company: &draft.company,
            location: &draft.location,
            posting_date: draft.posting_date.format("%Y-%m-%d").to_string(),
            job_type: draft.job_type.as_str(),
            tags: &draft.tags,
            link: draft.link.as_deref(),
        }
    }
}

/// Response to a write: either the saved record or a bare acknowledgement.
///
/// The acknowledgement requires `message`, so a malformed record is a decode
/// error rather than a silent acknowledgement.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SaveResponse {
    Saved(Job),
    Acknowledged { message: String },
}

/// Optional structured error body.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
