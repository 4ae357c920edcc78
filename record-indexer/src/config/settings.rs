//! Service configuration values read from the process environment.
//!
//! The host normally hands the configuration over directly. When the indexer
//! runs standalone, each key is read from the upper-cased environment
//! variable of the same name (`source_dsn` from `SOURCE_DSN`, ...).

use std::collections::HashMap;
use std::env;

use record_indexer_shared::config::{OPTIONAL_KEYS, REQUIRED_KEYS};

/// Collect configuration values from the process environment.
pub fn values_from_env() -> HashMap<String, String> {
    values_from_vars(env::vars())
}

/// Collect configuration values from `(NAME, value)` pairs.
///
/// Only known keys are kept; names are matched case-insensitively and stored
/// lower-cased.
pub fn values_from_vars<I>(vars: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    vars.into_iter()
        .filter_map(|(name, value)| {
            let key = name.to_ascii_lowercase();
            let known = REQUIRED_KEYS
                .iter()
                .chain(OPTIONAL_KEYS.iter())
                .any(|k| *k == key);
            known.then_some((key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_from_vars() {
        let values = values_from_vars(vec![
            ("SOURCE_DSN".to_string(), "sqlite:///tmp/x.db".to_string()),
            ("SOURCE_TB".to_string(), "items".to_string()),
            ("DEBUG".to_string(), "1".to_string()),
            ("PATH".to_string(), "/usr/bin".to_string()),
        ]);

        assert_eq!(values.len(), 3);
        assert_eq!(values.get("source_dsn").map(String::as_str), Some("sqlite:///tmp/x.db"));
        assert_eq!(values.get("debug").map(String::as_str), Some("1"));
        assert!(!values.contains_key("path"));
    }
}
