//! Error types for the record indexer repository.

mod index_error;
mod source_error;

pub use index_error::IndexError;
pub use source_error::SourceError;
