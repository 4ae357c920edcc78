//! Service configuration supplied by the host for each invocation.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ConfigError;

/// Default HTTP request timeout towards the index server.
pub const DEFAULT_INDEX_TIMEOUT_SECS: u64 = 30;

/// Default HTTP connect timeout towards the index server.
pub const DEFAULT_INDEX_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default bound on database connect plus query time.
pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 30;

/// Keys that must be present and non-empty.
pub const REQUIRED_KEYS: [&str; 7] = [
    "index_endpoint",
    "source_dsn",
    "source_user",
    "source_password",
    "source_tb",
    "source_fields",
    "source_id_field",
];

/// Optional keys understood on top of [`REQUIRED_KEYS`].
pub const OPTIONAL_KEYS: [&str; 5] = [
    "debug",
    "index_timeout_secs",
    "index_connect_timeout_secs",
    "source_timeout_secs",
    "source_id_type",
];

/// SQL type the job id is bound as when querying the source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdType {
    /// Bind the id text as given.
    #[default]
    Text,
    /// Bind the id as a 64-bit integer, for strictly typed numeric keys.
    Integer,
}

impl FromStr for IdType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "integer" | "int" | "bigint" => Ok(Self::Integer),
            _ => Err(()),
        }
    }
}

/// Validated service configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL of the index server, e.g. `http://localhost:8983/solr`.
    pub index_endpoint: String,
    /// Database URL understood by the SQL driver.
    pub source_dsn: String,
    pub source_user: String,
    pub source_password: String,
    /// Table the record is read from.
    pub source_tb: String,
    /// Comma-delimited column list, interpolated verbatim.
    pub source_fields: String,
    /// Primary-key column matched against the job id.
    pub source_id_field: String,
    /// How the id is bound against `source_id_field`.
    pub source_id_type: IdType,
    /// Log the SQL text and the full document at info level.
    pub debug: bool,
    pub index_timeout: Duration,
    pub index_connect_timeout: Duration,
    pub source_timeout: Duration,
}

impl ServiceConfig {
    /// Build and validate a configuration from the host's key/value mapping.
    ///
    /// Unknown keys are ignored. The first missing or empty required key is
    /// reported.
    pub fn from_map(values: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let required = |key: &str| -> Result<String, ConfigError> {
            values
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| ConfigError::missing(key))
        };

        let index_endpoint = required("index_endpoint")?;
        let source_dsn = required("source_dsn")?;
        let source_user = required("source_user")?;
        let source_password = required("source_password")?;
        let source_tb = required("source_tb")?;
        let source_fields = required("source_fields")?;
        let source_id_field = required("source_id_field")?;

        Ok(Self {
            index_endpoint,
            source_dsn,
            source_user,
            source_password,
            source_tb,
            source_fields,
            source_id_field,
            source_id_type: parse_id_type(values)?,
            debug: parse_flag(values, "debug")?,
            index_timeout: parse_secs(values, "index_timeout_secs", DEFAULT_INDEX_TIMEOUT_SECS)?,
            index_connect_timeout: parse_secs(
                values,
                "index_connect_timeout_secs",
                DEFAULT_INDEX_CONNECT_TIMEOUT_SECS,
            )?,
            source_timeout: parse_secs(values, "source_timeout_secs", DEFAULT_SOURCE_TIMEOUT_SECS)?,
        })
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("index_endpoint", &self.index_endpoint)
            .field("source_dsn", &self.source_dsn)
            .field("source_user", &self.source_user)
            .field("source_password", &"<redacted>")
            .field("source_tb", &self.source_tb)
            .field("source_fields", &self.source_fields)
            .field("source_id_field", &self.source_id_field)
            .field("source_id_type", &self.source_id_type)
            .field("debug", &self.debug)
            .field("index_timeout", &self.index_timeout)
            .field("index_connect_timeout", &self.index_connect_timeout)
            .field("source_timeout", &self.source_timeout)
            .finish()
    }
}

fn parse_flag(values: &HashMap<String, String>, key: &str) -> Result<bool, ConfigError> {
    match values.get(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "" | "0" | "false" | "no" | "off" => Ok(false),
            "1" | "true" | "yes" | "on" => Ok(true),
            _ => Err(ConfigError::invalid(key, v)),
        },
    }
}

fn parse_id_type(values: &HashMap<String, String>) -> Result<IdType, ConfigError> {
    match values.get("source_id_type").map(|v| v.trim()) {
        None | Some("") => Ok(IdType::default()),
        Some(v) => v
            .parse()
            .map_err(|_| ConfigError::invalid("source_id_type", v)),
    }
}

fn parse_secs(
    values: &HashMap<String, String>,
    key: &str,
    default: u64,
) -> Result<Duration, ConfigError> {
    match values.get(key).map(|v| v.trim()) {
        None | Some("") => Ok(Duration::from_secs(default)),
        Some(v) => v
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| ConfigError::invalid(key, v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_values() -> HashMap<String, String> {
        [
            ("index_endpoint", "http://localhost:8983/solr"),
            ("source_dsn", "mysql://db.internal/catalog"),
            ("source_user", "indexer"),
            ("source_password", "hunter2"),
            ("source_tb", "items"),
            ("source_fields", "sku, title"),
            ("source_id_field", "id"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_from_map_defaults() {
        let config = ServiceConfig::from_map(&base_values()).unwrap();

        assert_eq!(config.source_tb, "items");
        assert!(!config.debug);
        assert_eq!(config.index_timeout, Duration::from_secs(DEFAULT_INDEX_TIMEOUT_SECS));
        assert_eq!(config.source_timeout, Duration::from_secs(DEFAULT_SOURCE_TIMEOUT_SECS));
        assert_eq!(config.source_id_type, IdType::Text);
    }

    #[test]
    fn test_every_required_key_is_checked() {
        for key in REQUIRED_KEYS {
            let mut values = base_values();
            values.remove(key);
            assert_eq!(
                ServiceConfig::from_map(&values).unwrap_err(),
                ConfigError::missing(key)
            );

            let mut values = base_values();
            values.insert(key.to_string(), "  ".to_string());
            assert_eq!(
                ServiceConfig::from_map(&values).unwrap_err(),
                ConfigError::missing(key)
            );
        }
    }

    #[test]
    fn test_optional_values() {
        let mut values = base_values();
        values.insert("debug".to_string(), "Yes".to_string());
        values.insert("index_timeout_secs".to_string(), "5".to_string());
        values.insert("source_timeout_secs".to_string(), "12".to_string());
        values.insert("source_id_type".to_string(), "Integer".to_string());

        let config = ServiceConfig::from_map(&values).unwrap();

        assert_eq!(config.source_id_type, IdType::Integer);
        assert!(config.debug);
        assert_eq!(config.index_timeout, Duration::from_secs(5));
        assert_eq!(config.source_timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_invalid_optional_values() {
        let mut values = base_values();
        values.insert("index_timeout_secs".to_string(), "soon".to_string());
        assert_eq!(
            ServiceConfig::from_map(&values).unwrap_err(),
            ConfigError::invalid("index_timeout_secs", "soon")
        );

        let mut values = base_values();
        values.insert("source_timeout_secs".to_string(), "0".to_string());
        assert!(ServiceConfig::from_map(&values).is_err());

        let mut values = base_values();
        values.insert("debug".to_string(), "maybe".to_string());
        assert!(ServiceConfig::from_map(&values).is_err());

        let mut values = base_values();
        values.insert("source_id_type".to_string(), "uuid".to_string());
        assert_eq!(
            ServiceConfig::from_map(&values).unwrap_err(),
            ConfigError::invalid("source_id_type", "uuid")
        );
    }

    #[test]
    fn test_debug_output_redacts_password() {
        let config = ServiceConfig::from_map(&base_values()).unwrap();
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
