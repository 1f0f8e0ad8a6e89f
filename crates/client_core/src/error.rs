use reqwest::StatusCode;
use shared::protocol::Endpoint;
use thiserror::Error;

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(" ({detail})"))
        .unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("login failed: {0} must not be empty")]
    EmptyField(&'static str),
    #[error("login failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("login failed: {status}{}", detail_suffix(.detail))]
    Rejected {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("login failed: malformed token response: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum FetchCause {
    #[error("{status}{}", detail_suffix(.detail))]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unparsable body: {0}")]
    Decode(String),
}

/// Failure of a single data endpoint.
#[derive(Debug, Error)]
#[error("failed to load {endpoint}: {cause}")]
pub struct FetchError {
    pub endpoint: Endpoint,
    pub cause: FetchCause,
}

impl FetchError {
    pub fn new(endpoint: Endpoint, cause: FetchCause) -> Self {
        Self { endpoint, cause }
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
