//! Host implementation that reports through `tracing`.
//!
//! Used when the indexer runs standalone, outside of a job framework.

use std::sync::atomic::{AtomicU8, Ordering};

use tracing::{debug, error, info, warn};

use super::{JobHost, LogLevel};

const PENDING: u8 = 0;
const COMPLETED: u8 = 1;
const FAILED: u8 = 2;

/// A `JobHost` that logs every signal and remembers the final state.
pub struct TracingHost {
    state: AtomicU8,
}

impl TracingHost {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(PENDING),
        }
    }

    /// Whether `completed_job` was signalled.
    pub fn completed(&self) -> bool {
        self.state.load(Ordering::SeqCst) == COMPLETED
    }

    /// Whether `failed_job` was signalled.
    pub fn failed(&self) -> bool {
        self.state.load(Ordering::SeqCst) == FAILED
    }
}

impl Default for TracingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl JobHost for TracingHost {
    fn completed_job(&self) {
        self.state.store(COMPLETED, Ordering::SeqCst);
        info!("Job completed");
    }

    fn failed_job(&self, message: &str) {
        self.state.store(FAILED, Ordering::SeqCst);
        error!(message = %message, "Job failed");
    }

    fn log_msg(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => debug!(target: "host", "{}", message),
            LogLevel::Info => info!(target: "host", "{}", message),
            LogLevel::Warn => warn!(target: "host", "{}", message),
            LogLevel::Error => error!(target: "host", "{}", message),
        }
    }
}
