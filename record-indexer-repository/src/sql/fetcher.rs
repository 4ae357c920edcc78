//! sqlx-backed record source.
//!
//! Opens one connection per fetch through the `Any` driver, so the same
//! binary serves PostgreSQL, MySQL and SQLite depending on the DSN scheme.

use async_trait::async_trait;
use sqlx::any::AnyRow;
use sqlx::{Any, AnyConnection, Column, Connection, Row};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::SqlSourceConfig;
use crate::errors::SourceError;
use crate::interfaces::RecordSource;
use crate::sql::query::numbered_placeholder;
use record_indexer_shared::{IdType, Record};

/// `RecordSource` reading from a relational database.
///
/// Connections are not pooled: every fetch connects, runs the query and
/// closes the connection again, whichever way the fetch ends.
///
/// # Example
///
/// ```ignore
/// let source = SqlRecordSource::new(SqlSourceConfig::new(
///     "postgres://db.internal/catalog",
///     "indexer",
///     "secret",
/// ))?;
/// let record = source.fetch("SELECT sku, title FROM items WHERE id = ?", "42").await?;
/// ```
pub struct SqlRecordSource {
    config: SqlSourceConfig,
    url: String,
    numbered_params: bool,
}

impl SqlRecordSource {
    /// Create a record source for the given connection settings.
    ///
    /// # Returns
    ///
    /// * `Ok(SqlRecordSource)` - A source ready to fetch
    /// * `Err(SourceError)` - If the DSN is not a valid URL
    pub fn new(config: SqlSourceConfig) -> Result<Self, SourceError> {
        sqlx::any::install_default_drivers();

        let parsed = Url::parse(&config.dsn)
            .map_err(|e| SourceError::connection(format!("Invalid DSN: {}", e)))?;
        let scheme = parsed.scheme().to_string();
        let numbered_params = scheme.starts_with("postgres");
        let url = Self::connection_url(parsed, &config)?;

        debug!(
            scheme = %scheme,
            numbered_params,
            "Created SQL record source"
        );

        Ok(Self {
            config,
            url,
            numbered_params,
        })
    }

    /// Inject the configured credentials into a DSN that names a host but no
    /// user. DSNs without a host (SQLite files) are used untouched.
    fn connection_url(mut parsed: Url, config: &SqlSourceConfig) -> Result<String, SourceError> {
        let has_host = parsed.host_str().is_some_and(|h| !h.is_empty());
        if !has_host || !parsed.username().is_empty() {
            return Ok(config.dsn.clone());
        }

        parsed
            .set_username(&config.user)
            .map_err(|_| SourceError::connection("DSN does not accept a user name"))?;
        parsed
            .set_password(Some(config.password.as_str()))
            .map_err(|_| SourceError::connection("DSN does not accept a password"))?;

        Ok(parsed.to_string())
    }

    async fn query_one(
        conn: &mut AnyConnection,
        sql: &str,
        id: &str,
        id_value: IdValue,
    ) -> Result<Record, SourceError> {
        let query = sqlx::query::<Any>(sql);
        let query = match id_value {
            IdValue::Text(text) => query.bind(text),
            IdValue::Integer(n) => query.bind(n),
        };

        let row = query
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| match e {
                sqlx::Error::Io(_) | sqlx::Error::Tls(_) => SourceError::connection(e.to_string()),
                _ => SourceError::query(e.to_string()),
            })?
            .ok_or_else(|| SourceError::not_found(id))?;

        row_to_record(&row)
    }
}

#[async_trait]
impl RecordSource for SqlRecordSource {
    #[instrument(skip(self, query))]
    async fn fetch(&self, query: &str, id: &str) -> Result<Record, SourceError> {
        let id_value = IdValue::for_type(id, self.config.id_type)?;
        let sql = if self.numbered_params {
            numbered_placeholder(query)
        } else {
            query.to_string()
        };

        let mut conn = timeout(self.config.timeout, AnyConnection::connect(&self.url))
            .await
            .map_err(|_| {
                SourceError::timeout(format!(
                    "connecting took longer than {:?}",
                    self.config.timeout
                ))
            })?
            .map_err(|e| SourceError::connection(e.to_string()))?;

        let result = timeout(self.config.timeout, Self::query_one(&mut conn, &sql, id, id_value)).await;

        match result {
            Ok(record) => {
                if let Err(e) = conn.close().await {
                    warn!(error = %e, "Failed to close database connection");
                }
                let record = record?;
                debug!(columns = record.len(), "Fetched record");
                Ok(record)
            }
            Err(_) => {
                // No graceful close: the server already stopped answering.
                drop(conn);
                Err(SourceError::timeout(format!(
                    "query took longer than {:?}",
                    self.config.timeout
                )))
            }
        }
    }
}

/// The job id converted to the bind type the source table expects.
#[derive(Debug, PartialEq)]
enum IdValue {
    Text(String),
    Integer(i64),
}

impl IdValue {
    fn for_type(id: &str, id_type: IdType) -> Result<Self, SourceError> {
        match id_type {
            IdType::Text => Ok(Self::Text(id.to_string())),
            IdType::Integer => id
                .parse::<i64>()
                .map(Self::Integer)
                .map_err(|_| SourceError::invalid_id(id, "integer")),
        }
    }
}

fn row_to_record(row: &AnyRow) -> Result<Record, SourceError> {
    let mut record = Record::new();
    for column in row.columns() {
        let value = decode_value(row, column.ordinal())
            .map_err(|e| SourceError::decode(format!("column {}: {}", column.name(), e)))?;
        record.insert(column.name(), value);
    }
    Ok(record)
}

/// Render a column as text, trying the types the `Any` driver can carry.
fn decode_value(row: &AnyRow, index: usize) -> Result<Option<String>, sqlx::Error> {
    if let Ok(value) = row.try_get::<Option<String>, _>(index) {
        return Ok(value);
    }
    if let Ok(value) = row.try_get::<Option<i64>, _>(index) {
        return Ok(value.map(|n| n.to_string()));
    }
    if let Ok(value) = row.try_get::<Option<f64>, _>(index) {
        return Ok(value.map(|n| n.to_string()));
    }
    if let Ok(value) = row.try_get::<Option<bool>, _>(index) {
        return Ok(value.map(|b| b.to_string()));
    }
    row.try_get::<Option<Vec<u8>>, _>(index)
        .map(|value| value.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
}
