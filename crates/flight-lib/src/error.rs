//! Error types for the flight delay client

use thiserror::Error;

/// Invalid or contradictory user input, detected before any request is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("origin and destination cannot be the same ({0})")]
    SameOriginDestination(String),
}

/// Failure of a call to the prediction service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service answered with a non-success status
    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body did not match the expected shape
    #[error("failed to parse response: {0}")]
    Decode(String),

    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

impl ServiceError {
    /// HTTP status code, when the service produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ServiceError {
    fn from(err: url::ParseError) -> Self {
        ServiceError::Endpoint(err.to_string())
    }
}

/// A single carrier's route query failed; the carrier is left out of the summary
#[derive(Debug, Error)]
#[error("route query for {carrier} failed: {source}")]
pub struct FetchError {
    pub carrier: String,
    #[source]
    pub source: ServiceError,
}

/// Error returned by a search flow
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;
