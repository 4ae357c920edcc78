//! # Record Indexer
//!
//! Main library for the record indexer job handler.
//!
//! This crate provides the configuration loading, dependency wiring and
//! one-shot job runner used by the `record-indexer` binary. A job framework
//! embedding the indexer uses [`run_job`] with its own `JobHost`.

pub mod config;
pub mod runner;

pub use config::Dependencies;
pub use runner::{interrupted, run_job};

use record_indexer_pipeline::JobError;
use thiserror::Error;

/// Errors that can occur before a job reaches the pipeline.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Job setup error.
    #[error(transparent)]
    JobError(#[from] JobError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Whether the host may run the job again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::JobError(e) => e.is_retryable(),
            Self::ConfigError(_) | Self::IoError(_) => false,
        }
    }
}
