//! Processor module for the record indexer pipeline.
//!
//! Transforms fetched records into index documents.

mod document_encoder;

pub use document_encoder::DocumentEncoder;
