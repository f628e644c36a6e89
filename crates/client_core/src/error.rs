use std::{io, path::PathBuf};

use shared::protocol::Endpoint;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Status,
    Malformed,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{endpoint} request could not be built: {source}")]
    Encode {
        endpoint: Endpoint,
        source: reqwest::Error,
    },
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: Endpoint,
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        detail: Option<String>,
    },
    #[error("{endpoint} returned a malformed body: {reason}")]
    MalformedBody { endpoint: Endpoint, reason: String },
}

impl DispatchError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            DispatchError::Encode { endpoint, .. }
            | DispatchError::Transport { endpoint, .. }
            | DispatchError::Status { endpoint, .. }
            | DispatchError::MalformedBody { endpoint, .. } => *endpoint,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DispatchError::Transport { .. } => ErrorCategory::Transport,
            DispatchError::Status { .. } => ErrorCategory::Status,
            DispatchError::Encode { .. } | DispatchError::MalformedBody { .. } => {
                ErrorCategory::Malformed
            }
        }
    }

    /// The single line a page shows for this failure: the server's detail when
    /// it sent one, the endpoint's static fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            DispatchError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            other => other.endpoint().fallback_message().to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{value:?} is not a valid email address")]
    InvalidEmail { value: String },
    #[error("{field} must be a number")]
    NotANumber { field: &'static str },
    #[error("{field} must be one of {accept}, got {file_name}")]
    FileType {
        field: &'static str,
        file_name: String,
        accept: String,
    },
    #[error("could not read {field} file {}: {source}", path.display())]
    UnreadableFile {
        field: &'static str,
        path: PathBuf,
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{key} is not a valid URL ({value:?}): {source}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        source: url::ParseError,
    },
    #[error("{key} has an invalid value: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
