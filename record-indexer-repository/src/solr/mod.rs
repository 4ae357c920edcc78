//! Solr implementation of the index submitter.
//!
//! This module provides a concrete implementation of `IndexSubmitter`
//! posting XML update documents to a Solr core.

mod client;
mod response;

pub use client::SolrClient;
