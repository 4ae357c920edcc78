//! Configuration types for the record source and the Solr client.

use std::time::Duration;

use record_indexer_shared::config::{
    DEFAULT_INDEX_CONNECT_TIMEOUT_SECS, DEFAULT_INDEX_TIMEOUT_SECS, DEFAULT_SOURCE_TIMEOUT_SECS,
};
use record_indexer_shared::{IdType, ServiceConfig};

/// Configuration for the SolrClient.
#[derive(Debug, Clone)]
pub struct SolrClientConfig {
    /// Time allowed to establish the TCP/TLS connection.
    pub connect_timeout: Duration,
    /// Time allowed for the whole request, response body included.
    pub request_timeout: Duration,
}

impl Default for SolrClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(DEFAULT_INDEX_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_INDEX_TIMEOUT_SECS),
        }
    }
}

impl SolrClientConfig {
    /// Take the timeouts from the service configuration.
    pub fn from_service(config: &ServiceConfig) -> Self {
        Self {
            connect_timeout: config.index_connect_timeout,
            request_timeout: config.index_timeout,
        }
    }

    /// Create a config with a custom request timeout.
    pub fn with_request_timeout(request_timeout: Duration) -> Self {
        Self {
            request_timeout,
            ..Self::default()
        }
    }
}

/// Connection settings for the SqlRecordSource.
#[derive(Clone)]
pub struct SqlSourceConfig {
    /// Database URL, e.g. `postgres://db.internal/catalog`.
    pub dsn: String,
    pub user: String,
    pub password: String,
    /// Bound applied separately to connecting and to running the query.
    pub timeout: Duration,
    /// SQL type the id is bound as.
    pub id_type: IdType,
}

impl SqlSourceConfig {
    pub fn new(dsn: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            dsn: dsn.into(),
            user: user.into(),
            password: password.into(),
            timeout: Duration::from_secs(DEFAULT_SOURCE_TIMEOUT_SECS),
            id_type: IdType::default(),
        }
    }

    /// Take the connection settings from the service configuration.
    pub fn from_service(config: &ServiceConfig) -> Self {
        Self {
            dsn: config.source_dsn.clone(),
            user: config.source_user.clone(),
            password: config.source_password.clone(),
            timeout: config.source_timeout,
            id_type: config.source_id_type,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_id_type(mut self, id_type: IdType) -> Self {
        self.id_type = id_type;
        self
    }
}

impl std::fmt::Debug for SqlSourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlSourceConfig")
            .field("dsn", &self.dsn)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("id_type", &self.id_type)
            .finish()
    }
}
