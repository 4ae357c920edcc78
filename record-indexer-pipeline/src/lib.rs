//! # Record Indexer Pipeline
//!
//! This crate provides the pipeline that turns one job into one indexed
//! document.
//!
//! ## Architecture
//!
//! The pipeline runs four steps in sequence for every job:
//!
//! 1. **Query**: Builds the single-row SELECT from configuration
//! 2. **Fetch**: Reads the record through a `RecordSource`
//! 3. **Encode**: Turns the record into a Solr XML document
//! 4. **Submit**: Delivers the document through an `IndexSubmitter`
//!
//! The **JobDriver** sequences the steps and the **host** module maps the
//! outcome onto the job framework's completion signals.

pub mod errors;
pub mod host;
pub mod orchestrator;
pub mod processor;

pub use errors::JobError;
pub use host::{report, JobHandler, JobHost, JobOutcome, LogLevel, TracingHost};
pub use orchestrator::JobDriver;
pub use processor::DocumentEncoder;
