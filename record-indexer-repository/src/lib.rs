//! # Record Indexer Repository
//!
//! This crate provides traits and implementations for the two external
//! systems the indexer talks to: the relational database holding the records
//! and the Solr server receiving the documents. It includes definitions for
//! errors, interfaces, and concrete sqlx and reqwest backed implementations.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod solr;
pub mod sql;
pub mod types;

pub use config::{SolrClientConfig, SqlSourceConfig};
pub use errors::{IndexError, SourceError};
pub use interfaces::{IndexSubmitter, RecordSource};
pub use solr::SolrClient;
pub use sql::{build_query, SqlRecordSource};
pub use types::SubmitResponse;
