//! Interface definitions for the record source and the index submitter.
//!
//! This module defines the abstract traits that allow for dependency
//! injection of the database and index server backends.

mod index_submitter;
mod record_source;

pub use index_submitter::IndexSubmitter;
pub use record_source::RecordSource;
