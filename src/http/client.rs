//! Low-level HTTP client — `LemonHttp`.
//!
//! Executes single authenticated requests against the REST API and classifies
//! the outcome into the SDK error taxonomy. Paged listings live in
//! [`crate::http::pager`]. Internal to the SDK — the sub-clients wrap this.

use crate::auth::token::TokenManager;
use crate::error::{HttpError, SdkError};
use crate::http::retry::RetryPolicy;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Query parameters as `(name, value)` pairs.
pub type Query<'a> = [(&'a str, String)];

/// Low-level HTTP client for the lemon.markets REST API.
#[derive(Clone)]
pub struct LemonHttp {
    base_url: String,
    client: Client,
    auth: Arc<TokenManager>,
}

impl LemonHttp {
    pub fn new(base_url: &str, client: Client, auth: Arc<TokenManager>) -> Self {
        Self {
            base_url: normalize_base(base_url),
            client,
            auth,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn token_manager(&self) -> &TokenManager {
        &self.auth
    }

    /// Absolute URL for `endpoint`. Absolute URLs (e.g. a pager `next` link or
    /// a data-API endpoint) pass through unchanged.
    pub fn resolve(&self, endpoint: &str) -> String {
        if is_absolute(endpoint) {
            endpoint.to_string()
        } else {
            format!("{}{}", self.base_url, endpoint.trim_start_matches('/'))
        }
    }

    // ── Typed helpers ────────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &Query<'_>,
    ) -> Result<T, SdkError> {
        let value = self
            .execute(Method::GET, endpoint, None::<&()>, query, RetryPolicy::Idempotent)
            .await?;
        decode(value)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, SdkError> {
        let value = self
            .execute(Method::POST, endpoint, Some(body), &[], RetryPolicy::None)
            .await?;
        decode(value)
    }

    pub async fn put<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, SdkError> {
        let value = self
            .execute(Method::PUT, endpoint, None::<&()>, &[], RetryPolicy::None)
            .await?;
        decode(value)
    }

    pub async fn delete(&self, endpoint: &str) -> Result<(), SdkError> {
        self.execute(Method::DELETE, endpoint, None::<&()>, &[], RetryPolicy::None)
            .await?;
        Ok(())
    }

    // ── Executor ─────────────────────────────────────────────────────────

    /// Perform one logical request, retrying per `retry`.
    ///
    /// Bodies are form-encoded. A successful DELETE yields `Value::Null`
    /// without reading the body as JSON; every other method must return a
    /// JSON body or fails with [`HttpError::MalformedResponse`].
    pub async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        query: &Query<'_>,
        retry: RetryPolicy,
    ) -> Result<Value, SdkError> {
        let url = self.resolve(endpoint);
        let Some(config) = retry.config() else {
            return self.do_request(&method, &url, body, query).await;
        };

        let mut attempt = 0;
        loop {
            match self.do_request(&method, &url, body, query).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < config.max_retries && config.should_retry(&e) => {
                    let delay = config.delay_for_attempt(attempt);
                    tracing::debug!(
                        attempt = attempt + 1,
                        max = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying request to {}",
                        url
                    );
                    futures_timer::Delay::new(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn do_request<B: Serialize + ?Sized>(
        &self,
        method: &Method,
        url: &str,
        body: Option<&B>,
        query: &Query<'_>,
    ) -> Result<Value, SdkError> {
        let (header, value) = self.auth.authorization_header().await?;
        let mut req = self.client.request(method.clone(), url).header(header, value);

        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(b) = body {
            req = req.form(b);
        }

        tracing::debug!(method = %method, url = %url, "Sending request");
        let resp = req.send().await.map_err(classify_transport)?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(classify_transport)?;

        if !status.is_success() {
            return Err(HttpError::Api {
                status: status.as_u16(),
                message: error_message(&bytes),
            }
            .into());
        }

        if *method == Method::DELETE {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            HttpError::MalformedResponse(format!("{} {}: {}", method, url, e)).into()
        })
    }
}

/// Decode a JSON value into a typed record; shape mismatches are malformed responses.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, SdkError> {
    serde_json::from_value(value)
        .map_err(|e| HttpError::MalformedResponse(e.to_string()).into())
}

/// Map a transport-level `reqwest` failure onto the HTTP error taxonomy.
pub(crate) fn classify_transport(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Connection(e)
    }
}

pub(crate) fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

pub(crate) fn normalize_base(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}

/// Human-readable message from an error body: a `message`/`detail`/
/// `error_message` field when the body is JSON, else the raw text.
fn error_message(body: &[u8]) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        for key in ["message", "detail", "error_message"] {
            if let Some(Value::String(msg)) = map.get(key) {
                return msg.clone();
            }
        }
        return Value::Object(map).to_string();
    }
    String::from_utf8_lossy(body).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_appends_single_slash() {
        assert_eq!(normalize_base("http://x/rest/v1"), "http://x/rest/v1/");
        assert_eq!(normalize_base("http://x/rest/v1///"), "http://x/rest/v1/");
    }

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute("https://paper-trading.lemon.markets/rest/v1/spaces/"));
        assert!(is_absolute("http://127.0.0.1:1234/x"));
        assert!(!is_absolute("spaces/"));
        assert!(!is_absolute("/spaces/"));
    }

    #[test]
    fn test_error_message_prefers_message_field() {
        assert_eq!(error_message(br#"{"message": "insufficient funds"}"#), "insufficient funds");
        assert_eq!(error_message(br#"{"detail": "not found"}"#), "not found");
        assert_eq!(error_message(br#"{"code": 7}"#), r#"{"code":7}"#);
        assert_eq!(error_message(b"Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_decode_shape_mismatch_is_malformed() {
        let err = decode::<Vec<u32>>(serde_json::json!({"a": 1})).unwrap_err();
        assert!(matches!(err, SdkError::Http(HttpError::MalformedResponse(_))));
    }
}
