//! Record source trait definition.

use async_trait::async_trait;

use crate::errors::SourceError;
use record_indexer_shared::Record;

/// Abstract interface for reading one record from the system of record.
///
/// Implementations are injected into the job driver, which lets tests swap
/// the database for an in-memory mock.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so that independent jobs can
/// share one instance.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Run `query` with `id` bound to its single placeholder and return the
    /// first row.
    ///
    /// # Arguments
    ///
    /// * `query` - SQL text with exactly one `?` placeholder
    /// * `id` - The primary-key value to bind
    ///
    /// # Returns
    ///
    /// * `Ok(Record)` - The matching row
    /// * `Err(SourceError::NotFound)` - If no row matches
    /// * `Err(SourceError)` - If connecting or querying fails
    async fn fetch(&self, query: &str, id: &str) -> Result<Record, SourceError>;
}
