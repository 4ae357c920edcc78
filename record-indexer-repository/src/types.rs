//! Response types for index submission.

/// Outcome of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    /// HTTP status code (always 2xx).
    pub status: u16,
    /// Canonical reason phrase for the status, e.g. `OK`.
    pub reason: String,
    /// Server-side processing time, when the server reported one.
    pub qtime_ms: Option<u64>,
    /// Raw response body.
    pub body: String,
}

impl SubmitResponse {
    /// Status code and reason phrase, e.g. `200 OK`.
    pub fn status_line(&self) -> String {
        if self.reason.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line() {
        let response = SubmitResponse {
            status: 200,
            reason: "OK".to_string(),
            qtime_ms: None,
            body: String::new(),
        };
        assert_eq!(response.status_line(), "200 OK");

        let response = SubmitResponse {
            status: 299,
            reason: String::new(),
            ..response
        };
        assert_eq!(response.status_line(), "299");
    }
}
