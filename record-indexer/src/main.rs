//! Standalone entry point: runs a single indexing job.
//!
//! The job parameters (`<params><id>42</id></params>`) come from the first
//! argument, or from stdin when no argument is given. Configuration comes
//! from the environment, optionally seeded from a `.env` file.

use std::env;
use std::io::{self, Read};
use std::process::ExitCode;

use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use record_indexer::config::values_from_env;
use record_indexer::{interrupted, run_job, IndexingError};
use record_indexer_pipeline::{report, JobOutcome, TracingHost};

/// Exit code for a job that ran and failed.
const EXIT_JOB_FAILED: u8 = 1;

/// Exit code when the job parameters could not be read at all.
const EXIT_NO_PARAMS: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    let params = match read_params() {
        Ok(params) => params,
        Err(e) => {
            error!(error = %e, "Failed to read job parameters");
            return ExitCode::from(EXIT_NO_PARAMS);
        }
    };

    let values = values_from_env();
    let host = TracingHost::new();

    let outcome = tokio::select! {
        outcome = run_job(&params, &values, &host) => outcome,
        () = interrupted(tokio::signal::ctrl_c()) => {
            warn!("Received shutdown signal, abandoning job");
            let outcome = JobOutcome::Failed {
                message: "Job interrupted".to_string(),
                retryable: true,
            };
            report(&outcome, &host);
            outcome
        }
    };

    if outcome.is_completed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_JOB_FAILED)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_params() -> Result<String, IndexingError> {
    if let Some(arg) = env::args().nth(1) {
        return Ok(arg);
    }

    let mut params = String::new();
    io::stdin().read_to_string(&mut params)?;
    if params.trim().is_empty() {
        return Err(IndexingError::config(
            "no job parameters given on the command line or stdin",
        ));
    }
    Ok(params)
}
