//! Orchestrator module for the record indexer pipeline.
//!
//! Sequences query, fetch, encode and submit for one job.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures::FutureExt;
use tracing::{debug, error, info, instrument};

use crate::errors::JobError;
use crate::host::{JobHandler, JobHost, JobOutcome, LogLevel};
use crate::processor::DocumentEncoder;
use record_indexer_repository::{
    build_query, IndexSubmitter, RecordSource, SolrClient, SolrClientConfig, SqlRecordSource,
    SqlSourceConfig, SubmitResponse,
};
use record_indexer_shared::job::ID_ARG;
use record_indexer_shared::{JobArgs, ServiceConfig};

/// Driver that runs the pipeline for one job at a time.
///
/// The driver:
/// - Reads the record id from the job arguments
/// - Fetches the record through its `RecordSource`
/// - Encodes it and hands it to its `IndexSubmitter`
/// - Folds every error, panics included, into a `JobOutcome`
///
/// Nothing is retried here. The driver holds no per-job state, so one
/// instance can serve concurrent jobs.
pub struct JobDriver<S, I> {
    source: S,
    submitter: I,
    encoder: DocumentEncoder,
}

impl<S, I> JobDriver<S, I>
where
    S: RecordSource,
    I: IndexSubmitter,
{
    /// Create a new driver with the given components.
    pub fn new(source: S, submitter: I) -> Self {
        Self {
            source,
            submitter,
            encoder: DocumentEncoder::new(),
        }
    }

    /// Run the steps, stopping at the first failure.
    async fn execute(
        &self,
        args: &JobArgs,
        config: &ServiceConfig,
        host: &dyn JobHost,
    ) -> Result<SubmitResponse, JobError> {
        let id = args
            .id()
            .ok_or_else(|| JobError::missing_argument(ID_ARG))?;

        let query = build_query(&config.source_tb, &config.source_fields, &config.source_id_field);
        if config.debug {
            info!(query = %query, "Built record query");
            host.log_msg(LogLevel::Info, &format!("Built query for id {}: {}", id, query));
        } else {
            debug!(query = %query, "Built record query");
            host.log_msg(LogLevel::Info, &format!("Built query for id {}", id));
        }

        let record = self.source.fetch(&query, id).await?;
        info!(fields = record.len(), "Fetched record");
        host.log_msg(
            LogLevel::Info,
            &format!("Fetched record {} with {} fields", id, record.len()),
        );

        let document = self.encoder.encode(&record);
        if config.debug {
            info!(document = %document.as_str(), "Encoded document");
            host.log_msg(LogLevel::Info, &format!("Encoded document: {}", document.as_str()));
        } else {
            host.log_msg(
                LogLevel::Info,
                &format!("Encoded document ({} bytes)", document.len()),
            );
        }

        let response = self.submitter.submit(&document).await?;
        info!(status = %response.status_line(), "Document submitted");
        host.log_msg(
            LogLevel::Info,
            &format!("Submitted document: {}", response.status_line()),
        );

        Ok(response)
    }
}

impl JobDriver<SqlRecordSource, SolrClient> {
    /// Build a driver talking to the database and Solr server named in the
    /// configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, JobError> {
        let source = SqlRecordSource::new(SqlSourceConfig::from_service(config))?;
        let submitter =
            SolrClient::new(&config.index_endpoint, SolrClientConfig::from_service(config))?;

        Ok(Self::new(source, submitter))
    }
}

#[async_trait]
impl<S, I> JobHandler for JobDriver<S, I>
where
    S: RecordSource,
    I: IndexSubmitter,
{
    #[instrument(skip_all, fields(id = args.id().unwrap_or_default()))]
    async fn run(
        &self,
        args: &JobArgs,
        config: &ServiceConfig,
        host: &dyn JobHost,
    ) -> JobOutcome {
        let result = match AssertUnwindSafe(self.execute(args, config, host))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => Err(JobError::unexpected(panic_message(panic.as_ref()))),
        };

        match result {
            Ok(response) => JobOutcome::Completed {
                status: response.status_line(),
            },
            Err(e) => {
                let retryable = e.is_retryable();
                error!(error = %e, retryable, "Job failed");
                host.log_msg(LogLevel::Error, &e.to_string());
                JobOutcome::Failed {
                    message: e.to_string(),
                    retryable,
                }
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("panic: {}", msg)
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("panic: {}", msg)
    } else {
        "panic with a non-string payload".to_string()
    }
}
