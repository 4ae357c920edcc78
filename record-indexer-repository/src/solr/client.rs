//! Solr client implementation.
//!
//! This module provides the concrete implementation of `IndexSubmitter`
//! using reqwest against Solr's XML update handler.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::config::SolrClientConfig;
use crate::errors::IndexError;
use crate::interfaces::IndexSubmitter;
use crate::solr::response::{error_detail, UpdateResponse};
use crate::types::SubmitResponse;
use record_indexer_shared::IndexDocument;

/// Content type Solr's update handler expects for XML documents.
pub const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Solr client implementation.
///
/// Delivers add documents to `{endpoint}/update`.
///
/// # Example
///
/// ```ignore
/// let client = SolrClient::new("http://localhost:8983/solr", SolrClientConfig::default())?;
/// let response = client.submit(&document).await?;
/// info!(status = %response.status_line(), "Indexed");
/// ```
pub struct SolrClient {
    client: Client,
    update_url: Url,
}

impl SolrClient {
    /// Create a new Solr client for the given core or collection URL.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Base URL, e.g. "http://localhost:8983/solr/items"
    /// * `config` - Connect and request timeouts
    ///
    /// # Returns
    ///
    /// * `Ok(SolrClient)` - A new client instance
    /// * `Err(IndexError)` - If the endpoint is not an http(s) URL or the
    ///   HTTP client cannot be built
    pub fn new(endpoint: &str, config: SolrClientConfig) -> Result<Self, IndexError> {
        let update_url = Self::update_url_for(endpoint)?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| IndexError::transport(e.to_string()))?;

        info!(
            update_url = %update_url,
            connect_timeout = ?config.connect_timeout,
            request_timeout = ?config.request_timeout,
            "Created Solr client"
        );

        Ok(Self { client, update_url })
    }

    /// Derive the update handler URL from the configured endpoint.
    ///
    /// Uses format: `{endpoint}/update`, tolerating a trailing slash.
    fn update_url_for(endpoint: &str) -> Result<Url, IndexError> {
        let base = Url::parse(endpoint)
            .map_err(|e| IndexError::invalid_endpoint(format!("{}: {}", endpoint, e)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(IndexError::invalid_endpoint(format!(
                "{}: unsupported scheme {}",
                endpoint,
                base.scheme()
            )));
        }

        let joined = format!("{}/update", endpoint.trim_end_matches('/'));
        Url::parse(&joined).map_err(|e| IndexError::invalid_endpoint(format!("{}: {}", joined, e)))
    }
}

#[async_trait]
impl IndexSubmitter for SolrClient {
    /// POST the document to the update handler.
    ///
    /// Any 2xx status is a success. Other statuses carry Solr's error message
    /// (or the raw body) in the returned error.
    #[instrument(skip(self, document), fields(bytes = document.len()))]
    async fn submit(&self, document: &IndexDocument) -> Result<SubmitResponse, IndexError> {
        let response = self
            .client
            .post(self.update_url.clone())
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .body(document.as_bytes().to_vec())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = match response.text().await {
            Ok(body) => Ok(body),
            Err(e) => {
                let err = transport_error(e);
                warn!(status = %status, error = %err, "Failed to read update response body");
                Err(err)
            }
        };

        if !status.is_success() {
            let detail = match &body {
                Ok(body) => error_detail(body),
                Err(e) => format!("response body unreadable: {}", e),
            };
            error!(status = %status, detail = %detail, "Update request failed");
            return Err(IndexError::status(status.as_u16(), reason, detail));
        }

        // The status line already confirms the add; a truncated body only
        // loses QTime.
        let body = body.unwrap_or_default();
        let qtime_ms = UpdateResponse::parse(&body).and_then(|r| r.qtime());
        debug!(status = %status, qtime_ms = ?qtime_ms, "Document accepted");

        Ok(SubmitResponse {
            status: status.as_u16(),
            reason,
            qtime_ms,
            body,
        })
    }
}

/// Classify a reqwest failure, keeping the underlying cause in the message.
fn transport_error(err: reqwest::Error) -> IndexError {
    let mut msg = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }

    if err.is_timeout() {
        IndexError::timeout(msg)
    } else {
        IndexError::transport(msg)
    }
}
