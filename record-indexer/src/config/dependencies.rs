//! Dependency initialization and wiring for the record indexer.

use tracing::info;

use crate::IndexingError;
use record_indexer_pipeline::JobDriver;
use record_indexer_repository::{SolrClient, SqlRecordSource};
use record_indexer_shared::ServiceConfig;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured driver ready to run jobs.
    pub driver: JobDriver<SqlRecordSource, SolrClient>,
}

impl Dependencies {
    /// Initialize all dependencies from a validated configuration.
    ///
    /// Nothing is contacted yet: the database connection is opened per job
    /// and the HTTP client connects lazily.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If the DSN or the index endpoint is unusable
    pub fn new(config: &ServiceConfig) -> Result<Self, IndexingError> {
        info!(
            index_endpoint = %config.index_endpoint,
            source_tb = %config.source_tb,
            source_fields = %config.source_fields,
            debug = config.debug,
            "Initializing dependencies"
        );

        let driver = JobDriver::from_config(config)?;

        Ok(Self { driver })
    }
}
