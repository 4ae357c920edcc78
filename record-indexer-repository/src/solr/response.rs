//! Solr update response parsing.
//!
//! Solr answers update requests with a JSON body by default. The body is only
//! used for logging and error messages, so anything unparseable is ignored.

use serde::Deserialize;

/// Longest response excerpt carried in an error message.
const MAX_DETAIL_LEN: usize = 512;

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateResponse {
    #[serde(rename = "responseHeader")]
    pub response_header: Option<ResponseHeader>,
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseHeader {
    pub status: Option<i64>,
    #[serde(rename = "QTime")]
    pub qtime: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub msg: Option<String>,
}

impl UpdateResponse {
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    pub fn qtime(&self) -> Option<u64> {
        self.response_header.as_ref().and_then(|h| h.qtime)
    }
}

/// The most useful failure text in a response body: Solr's own error
/// message when present, otherwise the trimmed body.
pub(crate) fn error_detail(body: &str) -> String {
    if let Some(msg) = UpdateResponse::parse(body)
        .and_then(|r| r.error)
        .and_then(|e| e.msg)
    {
        return msg;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    match trimmed.char_indices().nth(MAX_DETAIL_LEN) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
