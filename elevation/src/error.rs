use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElevationError {
    /// The service (or the request builder) rejected the request.
    /// Never retried.
    #[error("elevation request rejected: {message}")]
    InvalidRequest {
        status: Option<StatusCode>,
        message: String,
    },

    /// Every attempt failed transiently.
    #[error("elevation service failed after {attempts} attempts")]
    Service {
        attempts: u32,
        source: TransientError,
    },

    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Failures worth retrying.
#[derive(Error, Debug)]
pub enum TransientError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("service responded {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("expected {expected} elevations, received {received}")]
    Count { expected: usize, received: usize },
}

/// Outcome of a single failed attempt, as seen by
/// [`RetryPolicy::run`](crate::RetryPolicy::run).
#[derive(Debug)]
pub enum Failure {
    Transient(TransientError),
    Rejected {
        status: Option<StatusCode>,
        message: String,
    },
}

impl From<TransientError> for Failure {
    fn from(err: TransientError) -> Self {
        Self::Transient(err)
    }
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Rejected {
                status: None,
                message: err.to_string(),
            }
        } else {
            Self::Transient(TransientError::Http(err))
        }
    }
}
