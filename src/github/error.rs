use reqwest::StatusCode;
use thiserror::Error;

use crate::http::BoxError;

/// Broad classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request could not be built.
    Request,
    /// The request never produced a response.
    Transport,
    /// A response arrived with a non-2xx status.
    Status,
    /// The response body did not match the expected shape.
    Decode,
}

/// Errors returned by [`Client`](super::Client). Every variant carries the
/// URL that was requested.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{url}: failed to build request")]
    Request {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("{url}: failed to send request to GitHub API")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("{url}: GitHub API request failed with {status}")]
    Status { url: String, status: StatusCode },

    #[error("{url}: failed to parse JSON response from GitHub API")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Request { .. } => ErrorKind::Request,
            ApiError::Transport { .. } => ErrorKind::Transport,
            ApiError::Status { .. } => ErrorKind::Status,
            ApiError::Decode { .. } => ErrorKind::Decode,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ApiError::Request { url, .. }
            | ApiError::Transport { url, .. }
            | ApiError::Status { url, .. }
            | ApiError::Decode { url, .. } => url,
        }
    }

    /// The HTTP status, for [`ErrorKind::Status`] errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
