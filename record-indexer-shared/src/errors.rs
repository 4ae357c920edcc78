//! Error types for configuration and job parameter parsing.

use thiserror::Error;

/// Errors raised while building a [`ServiceConfig`](crate::ServiceConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required key is absent or empty.
    #[error("Missing configuration value: {0}")]
    Missing(String),

    /// A key is present but its value cannot be used.
    #[error("Invalid configuration value for {key}: {value:?}")]
    Invalid { key: String, value: String },
}

impl ConfigError {
    /// Create a missing key error.
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing(key.into())
    }

    /// Create an invalid value error.
    pub fn invalid(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Errors raised while parsing the host's job parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// The parameter fragment is not well-formed XML.
    #[error("Malformed job parameters: {0}")]
    Malformed(String),

    /// The fragment parsed but its root element is not `<params>`.
    #[error("Unexpected root element <{0}>, expected <params>")]
    UnexpectedRoot(String),
}

impl ParamsError {
    /// Create a malformed parameters error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}
