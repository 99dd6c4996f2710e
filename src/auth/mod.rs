//! Authentication — client credentials, bearer tokens, token refresh.
//!
//! ## Token lifecycle
//!
//! - A token is requested on the first authorized call (or an explicit
//!   `refresh()`), via the OAuth2 client-credentials grant.
//! - The token is considered expired `safety_margin` (default 60 s) before
//!   the server-reported expiry so it never runs out mid-request.
//! - Refresh replaces the token wholesale. Concurrent callers that observe an
//!   expired token wait for a single refresh and reuse its result.

#[cfg(feature = "http")]
pub mod client;

#[cfg(feature = "http")]
pub mod token;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Name of the header carrying the bearer token.
pub const AUTHORIZATION: &str = "Authorization";

/// Default number of seconds a token is treated as expired before it actually is.
pub const DEFAULT_TOKEN_SAFETY_MARGIN_SECS: u64 = 60;

// ============================================================================
// Credentials
// ============================================================================

/// OAuth2 client credentials. Immutable after construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn token_request(&self) -> TokenRequest<'_> {
        TokenRequest {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            grant_type: "client_credentials",
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Token
// ============================================================================

/// Token type reported by the auth server. Only bearer tokens are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Bearer,
}

impl TokenType {
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        if raw.eq_ignore_ascii_case("bearer") {
            Ok(TokenType::Bearer)
        } else {
            Err(AuthError::UnsupportedTokenType(raw.to_string()))
        }
    }
}

/// A bearer token with its (margin-adjusted) expiry.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    access_token: String,
    token_type: TokenType,
    expires_at: DateTime<Utc>,
}

impl Token {
    /// Build a token from the auth server's response received at `now`.
    ///
    /// `expires_at = now + expires_in - safety_margin`.
    pub fn from_response(
        response: TokenResponse,
        now: DateTime<Utc>,
        safety_margin: chrono::Duration,
    ) -> Result<Self, AuthError> {
        let access_token = response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingField("access_token"))?;
        let token_type = response
            .token_type
            .ok_or(AuthError::MissingField("token_type"))
            .and_then(|raw| TokenType::parse(&raw))?;
        let expires_in = response
            .expires_in
            .ok_or(AuthError::MissingField("expires_in"))?;

        Ok(Self {
            access_token,
            token_type,
            expires_at: now + chrono::Duration::seconds(expires_in) - safety_margin,
        })
    }

    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the token must be refreshed before use at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        match self.token_type {
            TokenType::Bearer => format!("Bearer {}", self.access_token),
        }
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// Form body of the client-credentials token request.
#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub grant_type: &'static str,
}

/// Response from the token endpoint. Every field is optional on the wire so
/// a missing one surfaces as [`AuthError::MissingField`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn response(token_type: &str, expires_in: i64) -> TokenResponse {
        TokenResponse {
            access_token: Some("tok1".to_string()),
            token_type: Some(token_type.to_string()),
            expires_in: Some(expires_in),
        }
    }

    fn margin() -> chrono::Duration {
        chrono::Duration::seconds(DEFAULT_TOKEN_SAFETY_MARGIN_SECS as i64)
    }

    #[test]
    fn test_expiry_applies_safety_margin() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let token = Token::from_response(response("bearer", 120), t0, margin()).unwrap();

        assert_eq!(token.expires_at(), t0 + chrono::Duration::seconds(60));
        assert!(!token.is_expired_at(t0));
        assert!(!token.is_expired_at(t0 + chrono::Duration::seconds(59)));
        assert!(token.is_expired_at(t0 + chrono::Duration::seconds(60)));
    }

    #[test]
    fn test_header_value() {
        let token = Token::from_response(response("bearer", 3600), Utc::now(), margin()).unwrap();
        assert_eq!(token.header_value(), "Bearer tok1");
        assert_eq!(token.token_type(), TokenType::Bearer);
    }

    #[test]
    fn test_bearer_is_case_insensitive() {
        assert!(Token::from_response(response("Bearer", 3600), Utc::now(), margin()).is_ok());
    }

    #[test]
    fn test_unknown_token_type_rejected() {
        let err = Token::from_response(response("mac", 3600), Utc::now(), margin()).unwrap_err();
        assert!(matches!(err, AuthError::UnsupportedTokenType(t) if t == "mac"));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let mut resp = response("bearer", 3600);
        resp.expires_in = None;
        let err = Token::from_response(resp, Utc::now(), margin()).unwrap_err();
        assert!(matches!(err, AuthError::MissingField("expires_in")));

        let mut resp = response("bearer", 3600);
        resp.access_token = Some(String::new());
        let err = Token::from_response(resp, Utc::now(), margin()).unwrap_err();
        assert!(matches!(err, AuthError::MissingField("access_token")));
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("id", "very-secret");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("id"));
        assert!(!printed.contains("very-secret"));
    }

    #[test]
    fn test_token_request_form() {
        let creds = Credentials::new("id", "secret");
        let req = creds.token_request();
        assert_eq!(req.grant_type, "client_credentials");
        assert_eq!(req.client_id, "id");
        assert_eq!(req.client_secret, "secret");
    }
}
