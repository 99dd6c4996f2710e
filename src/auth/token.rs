//! Credential manager — owns the client credentials and the current token.

use crate::auth::{Credentials, Token, TokenResponse, AUTHORIZATION};
use crate::error::{AuthError, HttpError};
use crate::http::client::classify_transport;

use async_lock::Mutex;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;

/// Obtains and refreshes bearer tokens.
///
/// The token slot is held for the whole check-and-refresh sequence, so at
/// most one token request is in flight per manager.
pub struct TokenManager {
    credentials: Credentials,
    auth_url: String,
    client: Client,
    safety_margin: chrono::Duration,
    token: Mutex<Option<Token>>,
}

impl TokenManager {
    pub fn new(
        credentials: Credentials,
        auth_url: &str,
        client: Client,
        safety_margin: Duration,
    ) -> Self {
        Self {
            credentials,
            auth_url: auth_url.to_string(),
            client,
            safety_margin: chrono::Duration::from_std(safety_margin)
                .unwrap_or_else(|_| chrono::Duration::seconds(60)),
            token: Mutex::new(None),
        }
    }

    pub fn client_id(&self) -> &str {
        self.credentials.client_id()
    }

    /// `(Authorization, "Bearer <token>")`, refreshing the token first if it
    /// is missing or within the safety margin of expiring.
    pub async fn authorization_header(&self) -> Result<(&'static str, String), AuthError> {
        let mut slot = self.token.lock().await;
        let now = Utc::now();
        let token = match slot.as_ref() {
            Some(token) if !token.is_expired_at(now) => token.clone(),
            _ => {
                let fresh = self.request_token().await?;
                *slot = Some(fresh.clone());
                fresh
            }
        };
        Ok((AUTHORIZATION, token.header_value()))
    }

    /// Unconditionally request a new token.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        let mut slot = self.token.lock().await;
        let fresh = self.request_token().await?;
        *slot = Some(fresh);
        Ok(())
    }

    /// Drop the current token; the next authorized call requests a new one.
    pub async fn invalidate(&self) {
        *self.token.lock().await = None;
    }

    /// Margin-adjusted expiry of the current token, if one is held.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.token.lock().await.as_ref().map(|t| t.expires_at())
    }

    /// Whether a token is held and still usable.
    pub async fn is_authenticated(&self) -> bool {
        self.token
            .lock()
            .await
            .as_ref()
            .map(|t| !t.is_expired_at(Utc::now()))
            .unwrap_or(false)
    }

    async fn request_token(&self) -> Result<Token, AuthError> {
        tracing::debug!(client_id = %self.credentials.client_id(), "Requesting access token");

        let resp = self
            .client
            .post(&self.auth_url)
            .form(&self.credentials.token_request())
            .send()
            .await
            .map_err(|e| AuthError::Request(classify_transport(e)))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| AuthError::Request(classify_transport(e)))?;

        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let parsed: TokenResponse = serde_json::from_slice(&body).map_err(|e| {
            AuthError::Request(HttpError::MalformedResponse(e.to_string()))
        })?;

        let token = Token::from_response(parsed, Utc::now(), self.safety_margin)?;
        tracing::debug!(expires_at = %token.expires_at(), "Access token refreshed");
        Ok(token)
    }
}
