//! Error types for talking to the rendering service and storing artifacts.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | `RequestFailed` | transport failure or HTTP status outside 200–299 |
//! | `DecodeFailed` | response body does not have the expected shape |
//! | `EncodeFailed` | request body could not be serialized |
//! | `FileSystemFailed` | the downloaded artifact could not be written or moved into place |
//!
//! None of these are retried internally. They travel up to the session, which
//! turns them into status text.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::traits::HttpError;

/// Remote operation an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Submit,
    RequestExport,
    Download,
    HealthCheck,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Submit => "submit",
            Operation::RequestExport => "export request",
            Operation::Download => "download",
            Operation::HealthCheck => "health check",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{operation} failed: {source}")]
    RequestFailed {
        operation: Operation,
        #[source]
        source: HttpError,
    },

    #[error("{operation} returned an unexpected body: {source}")]
    DecodeFailed {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    #[error("{operation} body could not be encoded: {source}")]
    EncodeFailed {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not write {}: {source}", .path.display())]
    FileSystemFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for backend and export operations.
pub type BackendResult<T> = Result<T, BackendError>;

impl BackendError {
    pub fn request(operation: Operation, source: HttpError) -> Self {
        BackendError::RequestFailed { operation, source }
    }

    pub fn decode(operation: Operation, source: serde_json::Error) -> Self {
        BackendError::DecodeFailed { operation, source }
    }

    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BackendError::FileSystemFailed {
            path: path.into(),
            source,
        }
    }

    /// Operation that failed, when the failure was remote.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            BackendError::RequestFailed { operation, .. }
            | BackendError::DecodeFailed { operation, .. }
            | BackendError::EncodeFailed { operation, .. } => Some(*operation),
            BackendError::FileSystemFailed { .. } => None,
        }
    }

    /// HTTP status returned by the server, if it answered with one.
    ///
    /// 4xx and 5xx are both `RequestFailed`; callers that care can inspect this.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::RequestFailed { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Short code for logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            BackendError::RequestFailed { .. } => "E_REQUEST",
            BackendError::DecodeFailed { .. } => "E_DECODE",
            BackendError::EncodeFailed { .. } => "E_ENCODE",
            BackendError::FileSystemFailed { .. } => "E_FS",
        }
    }

    /// Message suitable for the status line.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::RequestFailed { source, .. } => match source {
                HttpError::ConnectionFailed(_) => {
                    "Could not reach the server. Check the backend address and your network."
                        .to_string()
                }
                HttpError::Timeout(_) => "The server took too long to respond.".to_string(),
                HttpError::ServerError { status, .. } => match *status {
                    400 => "The server rejected the document (HTTP 400).".to_string(),
                    404 => "The server could not find the requested resource (HTTP 404).".to_string(),
                    500..=599 => format!("The server ran into a problem (HTTP {}).", status),
                    _ => format!("The server returned HTTP {}.", status),
                },
                other => other.to_string(),
            },
            BackendError::DecodeFailed { .. } => {
                "The server sent a response this client does not understand.".to_string()
            }
            BackendError::EncodeFailed { .. } => "The drawing could not be encoded.".to_string(),
            BackendError::FileSystemFailed { path, .. } => {
                format!("Could not save the presentation to {}.", path.display())
            }
        }
    }
}
