//! Index submission error types.
//!
//! This module defines the error types that can occur while delivering a
//! document to the index server.

use thiserror::Error;

/// Errors that can occur during index submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// The configured endpoint is not an http(s) URL.
    #[error("Invalid index endpoint: {0}")]
    InvalidEndpoint(String),

    /// The request never produced a response (DNS, refused connection, reset).
    #[error("Transport error: {0}")]
    TransportError(String),

    /// Connecting or waiting for the response exceeded the configured timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The index server answered with a non-success status.
    #[error("Index server responded with {status} {reason}: {detail}")]
    Status {
        status: u16,
        reason: String,
        detail: String,
    },
}

impl IndexError {
    /// Create an invalid endpoint error.
    pub fn invalid_endpoint(msg: impl Into<String>) -> Self {
        Self::InvalidEndpoint(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a timeout error.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create a status error.
    pub fn status(status: u16, reason: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Status {
            status,
            reason: reason.into(),
            detail: detail.into(),
        }
    }

    /// The HTTP status code, if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
