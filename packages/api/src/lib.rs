//! Transport layer for the job board.
//!
//! One operation per REST interaction on the `/jobs` resource:
//! - list (scoped by the filter selection), get, create, update, delete
//! - fetch-all, used to derive filter options
//!
//! [`JobsApi`] is the seam the stores depend on; [`HttpJobsApi`] is the
//! reqwest implementation.

mod config;
mod error;
mod http;
mod jobs;

pub use config::{ApiConfig, BASE_URL_ENV, DEFAULT_BASE_URL, TIMEOUT_ENV};
pub use error::ApiError;
pub use http::HttpJobsApi;
pub use jobs::{ApiFuture, ApiResult, JobPayload, JobsApi, ListQuery};

// Re-export core types for convenience
pub use board_core::{FilterOptions, FilterSelection, Job, JobDraft, JobId, JobType};
