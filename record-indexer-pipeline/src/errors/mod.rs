//! Error types for the record indexer pipeline.

use record_indexer_repository::{IndexError, SourceError};
use record_indexer_shared::{ConfigError, ParamsError};
use thiserror::Error;

/// Errors that can end a job.
///
/// Inspected once by the driver to build the failure message and the retry
/// hint handed to the host.
#[derive(Error, Debug)]
pub enum JobError {
    /// A required job argument is absent or blank.
    #[error("Missing job argument: {0}")]
    MissingArgument(String),

    /// The job parameter fragment could not be parsed.
    #[error("Invalid job parameters: {0}")]
    InvalidParams(#[from] ParamsError),

    /// The service configuration is incomplete or invalid.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// Fetching the record failed.
    #[error("Record fetch failed: {0}")]
    SourceError(#[from] SourceError),

    /// Delivering the document failed.
    #[error("Index submission failed: {0}")]
    IndexError(#[from] IndexError),

    /// Anything else, including a panic inside a pipeline step.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl JobError {
    /// Create a missing argument error.
    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::MissingArgument(name.into())
    }

    /// Create an unexpected error.
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Whether running the same job again may succeed.
    ///
    /// Bad arguments and bad configuration fail the same way every time.
    /// Database and index failures may be transient; a missing row is
    /// treated the same, since a lagging replica can catch up.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::MissingArgument(_) | Self::InvalidParams(_) | Self::ConfigError(_) => false,
            Self::IndexError(IndexError::InvalidEndpoint(_)) => false,
            Self::SourceError(SourceError::InvalidId(_)) => false,
            Self::SourceError(_) | Self::IndexError(_) | Self::Unexpected(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_classification() {
        assert!(!JobError::missing_argument("id").is_retryable());
        assert!(!JobError::from(ConfigError::missing("source_tb")).is_retryable());
        assert!(!JobError::from(ParamsError::malformed("eof")).is_retryable());
        assert!(!JobError::from(IndexError::invalid_endpoint("x")).is_retryable());
        assert!(!JobError::from(SourceError::invalid_id("A-1", "integer")).is_retryable());

        assert!(JobError::from(SourceError::not_found("42")).is_retryable());
        assert!(JobError::from(SourceError::connection("refused")).is_retryable());
        assert!(JobError::from(IndexError::status(503, "Service Unavailable", "")).is_retryable());
        assert!(JobError::unexpected("boom").is_retryable());
    }

    #[test]
    fn test_messages_keep_cause() {
        let err = JobError::from(IndexError::status(500, "Internal Server Error", "oops"));
        assert_eq!(
            err.to_string(),
            "Index submission failed: Index server responded with 500 Internal Server Error: oops"
        );

        let err = JobError::missing_argument("id");
        assert_eq!(err.to_string(), "Missing job argument: id");
    }
}
