//! Transport errors.

use thiserror::Error;

/// Errors returned by the transport layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request or its response stream failed: connection failure, timeout,
    /// or a list/get body that is not the expected JSON.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },

    /// A create/update body was read but is neither a job nor a `{message}`
    /// acknowledgement.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid api config: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) | ApiError::Config(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The server-provided or fallback message, without status decoration.
    pub fn message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
