//! Host integration for the record indexer pipeline.
//!
//! The job framework owns queuing, retries and log shipping. It invokes a
//! [`JobHandler`] per job and receives the result through the [`JobHost`]
//! signals it implements.

mod tracing_host;

use async_trait::async_trait;

use record_indexer_shared::{JobArgs, ServiceConfig};

pub use tracing_host::TracingHost;

/// Severity passed along with host log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Result of one job invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The document was accepted by the index server.
    Completed {
        /// Status line of the index server response, e.g. `200 OK`.
        status: String,
    },
    /// The job stopped at some step.
    Failed {
        /// Human-readable description of the failure.
        message: String,
        /// Hint for the host's retry policy.
        retryable: bool,
    },
}

impl JobOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Signals the host framework receives from a job.
pub trait JobHost: Send + Sync {
    /// The job finished successfully.
    fn completed_job(&self);

    /// The job failed; the host decides whether to run it again.
    fn failed_job(&self, message: &str);

    /// Forward a log line to the host.
    fn log_msg(&self, level: LogLevel, message: &str);
}

/// Capability the host invokes once per job.
#[async_trait]
pub trait JobHandler: Send + Sync {
    /// Run one job to completion. Never fails: every error is folded into a
    /// [`JobOutcome::Failed`].
    ///
    /// Progress is forwarded through `host.log_msg`; the completion signals
    /// are left to [`report`].
    async fn run(&self, args: &JobArgs, config: &ServiceConfig, host: &dyn JobHost)
        -> JobOutcome;
}

/// Translate an outcome into host signals.
///
/// Exactly one of `completed_job` or `failed_job` is called.
pub fn report(outcome: &JobOutcome, host: &dyn JobHost) {
    match outcome {
        JobOutcome::Completed { status } => {
            host.log_msg(LogLevel::Info, &format!("Document indexed: {}", status));
            host.completed_job();
        }
        JobOutcome::Failed { message, retryable } => {
            let retry = if *retryable { "retryable" } else { "permanent" };
            host.log_msg(LogLevel::Error, &format!("Job failed ({}): {}", retry, message));
            host.failed_job(message);
        }
    }
}
