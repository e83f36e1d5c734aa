//! Error types for the DDNS updater
//!
//! Every failure is fatal to the reconciliation attempt it occurs in. The
//! one-shot mode turns it into a non-zero exit, the polling loop logs it and
//! waits for the next cycle.

use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS updater
#[derive(Error, Debug)]
pub enum Error {
    /// Echo service or provider unreachable, or the transport failed
    #[error("Network error: {0}")]
    Network(String),

    /// Provider or echo service answered with something other than 200
    #[error("Request failed with status code {status}\nResponse Body: {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// Response body did not match the expected JSON shape, or a zone
    /// lookup came back empty
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a malformed-response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display_carries_status_and_body() {
        let err = Error::http_status(403, r#"{"success":false,"errors":[{"code":9109}]}"#);
        let msg = err.to_string();

        assert!(msg.contains("403"));
        assert!(msg.contains(r#"{"success":false,"errors":[{"code":9109}]}"#));
    }

    #[test]
    fn test_json_error_is_malformed_response() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }
}
