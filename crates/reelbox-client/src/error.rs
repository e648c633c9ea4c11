use crate::storage::StorageError;
use crate::api::auth::ValidationError;
use reqwest::StatusCode;
use thiserror::Error;

/// Every way a call through [`crate::ApiClient`] can fail.
///
/// The client never swallows one of these. A 401 additionally wipes the
/// session before the same error is handed back to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, TLS, reset).
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("{method} {url} failed with status {status}")]
    Status {
        method: String,
        url: String,
        status: StatusCode,
        body: Option<String>,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("invalid request URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid header value for {name}")]
    InvalidHeader { name: String },

    #[error("not logged in")]
    NotLoggedIn,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Response body of a failed call, when the backend sent one.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}
