//! # Record Indexer Shared
//!
//! Data model shared by the record indexer crates: the fetched [`Record`],
//! the encoded [`IndexDocument`], the per-job [`JobArgs`] and the
//! [`ServiceConfig`] handed over by the host.

pub mod config;
pub mod document;
pub mod errors;
pub mod job;
pub mod record;

pub use config::{IdType, ServiceConfig};
pub use document::IndexDocument;
pub use errors::{ConfigError, ParamsError};
pub use job::JobArgs;
pub use record::Record;
