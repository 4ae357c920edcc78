//! Record source error types.
//!
//! This module defines the error types that can occur while fetching a record
//! from the relational database.

use thiserror::Error;

/// Errors that can occur during record source operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Failed to open a connection to the database.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The query failed to prepare or execute.
    #[error("Query error: {0}")]
    QueryError(String),

    /// The query ran but matched no row.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The job id cannot be bound as the configured id type.
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// A column value could not be rendered as text.
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Connecting or querying exceeded the configured bound.
    #[error("Timeout: {0}")]
    Timeout(String),
}

impl SourceError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a record not found error.
    pub fn not_found(id: &str) -> Self {
        Self::NotFound(format!("no row matches id {}", id))
    }

    /// Create an invalid id error.
    pub fn invalid_id(id: &str, expected: &str) -> Self {
        Self::InvalidId(format!("{:?} is not a valid {}", id, expected))
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }

    /// Create a timeout error.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }
}
