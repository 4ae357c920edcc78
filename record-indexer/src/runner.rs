//! One-shot job runner.
//!
//! Parses the job parameters and configuration, runs the pipeline and reports
//! the outcome to the host. Setup failures are reported exactly like pipeline
//! failures, so the host always receives one completion signal.

use std::collections::HashMap;
use std::future::{pending, Future};
use std::io;

use tracing::{error, instrument, warn};

use crate::config::Dependencies;
use crate::IndexingError;
use record_indexer_pipeline::{report, JobError, JobHandler, JobHost, JobOutcome};
use record_indexer_shared::{JobArgs, ServiceConfig};

/// Run one job and signal its outcome to `host`.
///
/// # Arguments
///
/// * `params_xml` - The host's `<params>` fragment
/// * `values` - The configuration mapping
/// * `host` - Receives `completed_job` or `failed_job`
#[instrument(skip_all)]
pub async fn run_job(
    params_xml: &str,
    values: &HashMap<String, String>,
    host: &dyn JobHost,
) -> JobOutcome {
    let outcome = match prepare(params_xml, values) {
        Ok((args, config, deps)) => deps.driver.run(&args, &config, host).await,
        Err(e) => {
            error!(error = %e, "Job setup failed");
            JobOutcome::Failed {
                message: e.to_string(),
                retryable: e.is_retryable(),
            }
        }
    };

    report(&outcome, host);
    outcome
}

/// Resolve once `signal` fires.
///
/// A signal listener that cannot be installed never resolves, so the job is
/// left to finish on its own.
pub async fn interrupted<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        pending::<()>().await;
    }
}

fn prepare(
    params_xml: &str,
    values: &HashMap<String, String>,
) -> Result<(JobArgs, ServiceConfig, Dependencies), IndexingError> {
    let args = JobArgs::from_xml(params_xml).map_err(JobError::from)?;
    let config = ServiceConfig::from_map(values).map_err(JobError::from)?;
    let deps = Dependencies::new(&config)?;
    Ok((args, config, deps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use record_indexer_pipeline::TracingHost;
    use sqlx::{AnyConnection, Connection};
    use tempfile::TempDir;

    async fn setup_items_db() -> (String, TempDir) {
        sqlx::any::install_default_drivers();

        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("catalog.db");
        let mut conn = AnyConnection::connect(&format!("sqlite://{}?mode=rwc", db_path.display()))
            .await
            .unwrap();
        sqlx::query("CREATE TABLE items (id INTEGER PRIMARY KEY, sku TEXT, title TEXT, stock INTEGER)")
            .execute(&mut conn)
            .await
            .unwrap();
        sqlx::query("INSERT INTO items (id, sku, title, stock) VALUES (42, 'A1', 'Widget', 3)")
            .execute(&mut conn)
            .await
            .unwrap();
        conn.close().await.unwrap();

        (format!("sqlite://{}", db_path.display()), temp_dir)
    }

    fn values(dsn: &str, endpoint: &str) -> HashMap<String, String> {
        [
            ("index_endpoint", endpoint),
            ("source_dsn", dsn),
            ("source_user", "indexer"),
            ("source_password", "secret"),
            ("source_tb", "items"),
            ("source_fields", "sku,title"),
            ("source_id_field", "id"),
            ("index_timeout_secs", "5"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[tokio::test]
    async fn test_record_indexed_end_to_end() {
        let (dsn, _dir) = setup_items_db().await;
        let server = MockServer::start_async().await;
        let update = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/solr/update")
                    .header("content-type", "text/xml; charset=utf-8")
                    .body_contains("<add><doc>")
                    .body_contains(r#"<field name="sku">A1</field>"#)
                    .body_contains(r#"<field name="title">Widget</field>"#)
                    .body_contains("</doc></add>");
                then.status(200).body(r#"{"responseHeader":{"status":0,"QTime":2}}"#);
            })
            .await;
        let host = TracingHost::new();

        let outcome = run_job(
            "<params><id>42</id></params>",
            &values(&dsn, &server.url("/solr")),
            &host,
        )
        .await;

        assert_eq!(
            outcome,
            JobOutcome::Completed {
                status: "200 OK".to_string()
            }
        );
        assert!(host.completed());
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_index_rejection_fails_job() {
        let (dsn, _dir) = setup_items_db().await;
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/solr/update");
                then.status(503).body("Service Unavailable");
            })
            .await;
        let host = TracingHost::new();

        let outcome = run_job(
            "<params><id>42</id></params>",
            &values(&dsn, &server.url("/solr")),
            &host,
        )
        .await;

        match outcome {
            JobOutcome::Failed { message, retryable } => {
                assert!(message.contains("503 Service Unavailable"));
                assert!(retryable);
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(host.failed());
    }

    #[tokio::test]
    async fn test_unknown_id_never_reaches_index() {
        let (dsn, _dir) = setup_items_db().await;
        let server = MockServer::start_async().await;
        let update = server
            .mock_async(|when, then| {
                when.method(POST).path("/solr/update");
                then.status(200);
            })
            .await;
        let host = TracingHost::new();

        let outcome = run_job(
            "<params><id>9000</id></params>",
            &values(&dsn, &server.url("/solr")),
            &host,
        )
        .await;

        assert!(!outcome.is_completed());
        assert!(host.failed());
        update.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_missing_configuration_fails_job() {
        let mut values = values("sqlite:///tmp/unused.db", "http://localhost:8983/solr");
        values.remove("source_tb");
        let host = TracingHost::new();

        let outcome = run_job("<params><id>42</id></params>", &values, &host).await;

        assert_eq!(
            outcome,
            JobOutcome::Failed {
                message: "Configuration error: Missing configuration value: source_tb".to_string(),
                retryable: false,
            }
        );
        assert!(host.failed());
    }

    #[tokio::test]
    async fn test_interrupted_on_signal() {
        let fired = tokio::time::timeout(
            std::time::Duration::from_secs(1),
            interrupted(async { Ok(()) }),
        )
        .await;

        assert!(fired.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_signal_listener_never_interrupts() {
        let fired = tokio::time::timeout(
            std::time::Duration::from_secs(60),
            interrupted(async { Err(io::Error::other("no signal driver")) }),
        )
        .await;

        assert!(fired.is_err());
    }

    #[tokio::test]
    async fn test_malformed_params_fail_job() {
        let host = TracingHost::new();

        let outcome = run_job(
            "<params><id>42</params>",
            &values("sqlite:///tmp/unused.db", "http://localhost:8983/solr"),
            &host,
        )
        .await;

        match outcome {
            JobOutcome::Failed { message, retryable } => {
                assert!(message.starts_with("Invalid job parameters"));
                assert!(!retryable);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
