//! Auth sub-client — token inspection, forced refresh, logout.

use chrono::{DateTime, Utc};

use crate::client::LemonClient;
use crate::error::SdkError;

/// Sub-client for authentication operations.
///
/// Tokens are obtained lazily by the request layer; these methods exist for
/// callers that want to authenticate eagerly or drop a token explicitly.
pub struct Auth<'a> {
    pub(crate) client: &'a LemonClient,
}

impl<'a> Auth<'a> {
    /// Fetch a token now if none is held or the held one is expiring.
    ///
    /// Returns the `(header name, header value)` pair the next request uses.
    pub async fn authorization_header(&self) -> Result<(&'static str, String), SdkError> {
        Ok(self.client.http.token_manager().authorization_header().await?)
    }

    /// Request a new token even if the current one is still valid.
    pub async fn refresh(&self) -> Result<(), SdkError> {
        Ok(self.client.http.token_manager().refresh().await?)
    }

    /// Drop the held token. The next request authenticates again.
    pub async fn logout(&self) {
        self.client.http.token_manager().invalidate().await;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.client.http.token_manager().is_authenticated().await
    }

    /// When the held token stops being used, already adjusted by the safety
    /// margin.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.client.http.token_manager().expires_at().await
    }

    pub fn client_id(&self) -> &str {
        self.client.http.token_manager().client_id()
    }
}
