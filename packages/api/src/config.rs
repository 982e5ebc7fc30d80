//! Transport configuration.

use std::time::Duration;

use reqwest::Url;

use crate::ApiError;

/// Base address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Environment variable holding the base address.
pub const BASE_URL_ENV: &str = "JOB_BOARD_API_URL";

/// Environment variable holding an optional request timeout in seconds.
pub const TIMEOUT_ENV: &str = "JOB_BOARD_API_TIMEOUT_SECS";

/// Where the jobs resource lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base address, without the `/jobs` suffix.
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ApiConfig {
    /// Config pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Build a config from environment variables.
    ///
    /// - `JOB_BOARD_API_URL` (default: `http://localhost:5000`)
    /// - `JOB_BOARD_API_TIMEOUT_SECS` (optional, whole seconds)
    pub fn from_env() -> Result<Self, ApiError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(BASE_URL_ENV)
            && !url.trim().is_empty()
        {
            config.base_url = url.trim().to_string();
        }

        if let Ok(raw) = std::env::var(TIMEOUT_ENV)
            && !raw.trim().is_empty()
        {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiError::Config(format!("{} must be a whole number of seconds", TIMEOUT_ENV))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Set the base address.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// URL of the collection resource.
    pub fn jobs_url(&self) -> String {
        format!("{}/jobs", self.base_url.trim_end_matches('/'))
    }

    /// URL of a single posting. `id` is always one percent-encoded path
    /// segment, so `?`, `#` and `/` cannot reach another resource.
    pub fn job_url(&self, id: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.jobs_url())
            .map_err(|e| ApiError::Config(format!("invalid base url '{}': {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Config(format!("base url '{}' cannot hold a path", self.base_url)))?
            .push(id);
        Ok(url)
    }
}
