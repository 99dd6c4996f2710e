//! Unified SDK error types.
//!
//! Transient failures (`HttpError::Connection`, `HttpError::Timeout`, and
//! `HttpError::Api` with a 429/5xx status) may be retried by the caller.
//! Everything else is fatal for the call that produced it.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SdkError {
    /// Whether retrying the failed call may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SdkError::Http(e) => e.is_transient(),
            _ => false,
        }
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Connection failed: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("Timeout")]
    Timeout,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl HttpError {
    pub fn is_transient(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            HttpError::Connection(_) => true,
            HttpError::Timeout => true,
            HttpError::Api { status, .. } => *status == 429 || *status >= 500,
            HttpError::MalformedResponse(_) => false,
        }
    }

    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token request failed: {0}")]
    Request(HttpError),

    #[error("Token request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unsupported token type: {0}")]
    UnsupportedTokenType(String),

    #[error("Token response is missing `{0}`")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(HttpError::Timeout.is_transient());
        assert!(HttpError::Api {
            status: 503,
            message: String::new()
        }
        .is_transient());
        assert!(HttpError::Api {
            status: 429,
            message: String::new()
        }
        .is_transient());
        assert!(!HttpError::Api {
            status: 400,
            message: String::new()
        }
        .is_transient());
        assert!(!HttpError::MalformedResponse("eof".into()).is_transient());
    }

    #[test]
    fn test_sdk_error_transient_forwards() {
        assert!(SdkError::from(HttpError::Timeout).is_transient());
        assert!(!SdkError::from(AuthError::MissingField("access_token")).is_transient());
        assert!(!SdkError::Validation("rejected".into()).is_transient());
    }
}
