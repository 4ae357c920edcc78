//! SQL implementation of the record source.
//!
//! This module provides the query builder and a `RecordSource` backed by
//! sqlx's runtime-selected `Any` driver.

mod fetcher;
mod query;

pub use fetcher::SqlRecordSource;
pub use query::build_query;
