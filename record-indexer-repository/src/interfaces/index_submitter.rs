//! Index submitter trait definition.
//!
//! This module defines the abstract interface for delivering documents to
//! the index server, allowing for different backend implementations.

use async_trait::async_trait;

use crate::errors::IndexError;
use crate::types::SubmitResponse;
use record_indexer_shared::IndexDocument;

/// Abstracts the index server the documents are delivered to.
///
/// Submitting is an add-or-replace on the server side, so sending the same
/// record twice is harmless. Implementations never retry; retrying is the
/// host's decision.
#[async_trait]
pub trait IndexSubmitter: Send + Sync {
    /// Deliver one encoded document.
    ///
    /// # Returns
    ///
    /// * `Ok(SubmitResponse)` - The server accepted the document (2xx)
    /// * `Err(IndexError)` - Non-success status or transport failure
    async fn submit(&self, document: &IndexDocument) -> Result<SubmitResponse, IndexError>;
}
