//! High-level client — `LemonClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and accessor methods.

use crate::auth::client::Auth;
use crate::auth::token::TokenManager;
use crate::auth::{Credentials, DEFAULT_TOKEN_SAFETY_MARGIN_SECS};
use crate::domain::instrument::client::Instruments;
use crate::domain::instrument::Instrument;
use crate::domain::order::client::Orders;
use crate::domain::order::OrderCache;
use crate::domain::position::client::Portfolio;
use crate::domain::space::client::Spaces;
use crate::domain::space::Space;
use crate::domain::venue::client::Venues;
use crate::error::SdkError;
use crate::http::client::normalize_base;
use crate::http::LemonHttp;
use crate::network::{self, Environment};

use async_lock::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Re-export sub-client types for convenience.
pub use crate::auth::client::Auth as AuthClient;
pub use crate::domain::instrument::client::Instruments as InstrumentsClient;
pub use crate::domain::order::client::Orders as OrdersClient;
pub use crate::domain::position::client::Portfolio as PortfolioClient;
pub use crate::domain::space::client::Spaces as SpacesClient;
pub use crate::domain::venue::client::Venues as VenuesClient;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_SPACE_CACHE_TTL: Duration = Duration::from_secs(10);

/// The primary entry point for the SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.orders()`, `client.instruments()`, etc. Cloning is cheap and
/// clones share the token, the order cache and every lookup cache.
pub struct LemonClient {
    pub(crate) http: LemonHttp,
    /// Market-data API base, always ending in `/`.
    pub(crate) data_url: String,
    /// Space that orders and positions are scoped to.
    pub(crate) space_uuid: Option<String>,
    pub(crate) order_cache: Arc<OrderCache>,
    /// Instrument cache: isin → Instrument
    pub(crate) instrument_cache: Arc<RwLock<HashMap<String, Instrument>>>,
    /// Space cache: uuid → (Space, fetched_at)
    pub(crate) space_cache: Arc<RwLock<HashMap<String, (Space, Instant)>>>,
    pub(crate) space_cache_ttl: Duration,
}

impl LemonClient {
    pub fn builder() -> LemonClientBuilder {
        LemonClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn instruments(&self) -> Instruments<'_> {
        Instruments { client: self }
    }

    pub fn venues(&self) -> Venues<'_> {
        Venues { client: self }
    }

    pub fn spaces(&self) -> Spaces<'_> {
        Spaces { client: self }
    }

    pub fn portfolio(&self) -> Portfolio<'_> {
        Portfolio { client: self }
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    // ── Shared state ─────────────────────────────────────────────────────

    pub fn http(&self) -> &LemonHttp {
        &self.http
    }

    pub fn order_cache(&self) -> &Arc<OrderCache> {
        &self.order_cache
    }

    pub fn space_uuid(&self) -> Option<&str> {
        self.space_uuid.as_deref()
    }

    /// Clear all lookup caches and the order cache.
    pub async fn clear_all_caches(&self) {
        self.instrument_cache.write().await.clear();
        self.space_cache.write().await.clear();
        self.order_cache.clear().await;
    }

    /// Absolute URL for `path` on the market-data API.
    pub(crate) fn data_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.data_url, path.trim_start_matches('/'))
    }

    pub(crate) fn require_space(&self) -> Result<&str, SdkError> {
        self.space_uuid
            .as_deref()
            .ok_or_else(|| SdkError::Config("No space uuid configured".to_string()))
    }
}

impl Clone for LemonClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            data_url: self.data_url.clone(),
            space_uuid: self.space_uuid.clone(),
            order_cache: self.order_cache.clone(),
            instrument_cache: self.instrument_cache.clone(),
            space_cache: self.space_cache.clone(),
            space_cache_ttl: self.space_cache_ttl,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct LemonClientBuilder {
    environment: Environment,
    base_url: Option<String>,
    data_url: String,
    auth_url: String,
    credentials: Option<Credentials>,
    space_uuid: Option<String>,
    timeout: Duration,
    token_safety_margin: Duration,
    space_cache_ttl: Duration,
    order_cache: Option<Arc<OrderCache>>,
}

impl Default for LemonClientBuilder {
    fn default() -> Self {
        Self {
            environment: Environment::Paper,
            base_url: None,
            data_url: network::DEFAULT_DATA_API_URL.to_string(),
            auth_url: network::DEFAULT_AUTH_URL.to_string(),
            credentials: None,
            space_uuid: None,
            timeout: DEFAULT_TIMEOUT,
            token_safety_margin: Duration::from_secs(DEFAULT_TOKEN_SAFETY_MARGIN_SECS),
            space_cache_ttl: DEFAULT_SPACE_CACHE_TTL,
            order_cache: None,
        }
    }
}

impl LemonClientBuilder {
    /// Seed credentials, space and URL overrides from `LEMON_CLIENT_ID`,
    /// `LEMON_CLIENT_SECRET`, `LEMON_SPACE_UUID`, `LEMON_API_URL` and
    /// `LEMON_DATA_URL`. Unset variables leave the defaults in place.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        let mut builder = Self::default();
        if let (Some(id), Some(secret)) = (var("LEMON_CLIENT_ID"), var("LEMON_CLIENT_SECRET")) {
            builder.credentials = Some(Credentials::new(id, secret));
        }
        builder.space_uuid = var("LEMON_SPACE_UUID");
        builder.base_url = var("LEMON_API_URL");
        if let Some(url) = var("LEMON_DATA_URL") {
            builder.data_url = url;
        }
        builder
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Override the trading API base URL.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn data_url(mut self, url: &str) -> Self {
        self.data_url = url.to_string();
        self
    }

    pub fn auth_url(mut self, url: &str) -> Self {
        self.auth_url = url.to_string();
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn space_uuid(mut self, uuid: &str) -> Self {
        self.space_uuid = Some(uuid.to_string());
        self
    }

    /// Per-request timeout, applied to every call including token requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn token_safety_margin(mut self, margin: Duration) -> Self {
        self.token_safety_margin = margin;
        self
    }

    pub fn space_cache_ttl(mut self, ttl: Duration) -> Self {
        self.space_cache_ttl = ttl;
        self
    }

    /// Share an existing order cache instead of starting with an empty one.
    pub fn order_cache(mut self, cache: Arc<OrderCache>) -> Self {
        self.order_cache = Some(cache);
        self
    }

    pub fn build(self) -> Result<LemonClient, SdkError> {
        if self.environment == Environment::Money {
            return Err(SdkError::Config(
                "Real-money trading is not supported".to_string(),
            ));
        }
        let base_url = self
            .base_url
            .unwrap_or_else(|| self.environment.api_url().to_string());
        for url in [&base_url, &self.data_url, &self.auth_url] {
            if network::is_money_url(url) {
                return Err(SdkError::Config(format!(
                    "Refusing to target the real-money host: {}",
                    url
                )));
            }
        }
        let credentials = self
            .credentials
            .ok_or_else(|| SdkError::Config("No client credentials configured".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| SdkError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let tokens = Arc::new(TokenManager::new(
            credentials,
            &self.auth_url,
            client.clone(),
            self.token_safety_margin,
        ));

        Ok(LemonClient {
            http: LemonHttp::new(&base_url, client, tokens),
            data_url: normalize_base(&self.data_url),
            space_uuid: self.space_uuid,
            order_cache: self.order_cache.unwrap_or_default(),
            instrument_cache: Arc::new(RwLock::new(HashMap::new())),
            space_cache: Arc::new(RwLock::new(HashMap::new())),
            space_cache_ttl: self.space_cache_ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("id", "secret")
    }

    #[test]
    fn test_money_environment_rejected() {
        let result = LemonClient::builder()
            .credentials(credentials())
            .environment(Environment::Money)
            .build();
        assert!(matches!(result, Err(SdkError::Config(_))));
    }

    #[test]
    fn test_money_url_override_rejected() {
        let result = LemonClient::builder()
            .credentials(credentials())
            .base_url(network::DEFAULT_MONEY_API_URL)
            .build();
        assert!(matches!(result, Err(SdkError::Config(_))));
    }

    #[test]
    fn test_missing_credentials_rejected() {
        assert!(matches!(
            LemonClient::builder().build(),
            Err(SdkError::Config(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let client = LemonClient::builder()
            .credentials(credentials())
            .data_url("http://localhost:9000/v1")
            .build()
            .unwrap();
        assert_eq!(client.http().base_url(), network::DEFAULT_PAPER_API_URL);
        assert_eq!(
            client.data_endpoint("/instruments/"),
            "http://localhost:9000/v1/instruments/"
        );
        assert_eq!(client.space_cache_ttl, DEFAULT_SPACE_CACHE_TTL);
        assert!(client.space_uuid().is_none());
        assert!(matches!(client.require_space(), Err(SdkError::Config(_))));
    }

    #[test]
    fn test_clones_share_order_cache() {
        let shared = Arc::new(OrderCache::new());
        let client = LemonClient::builder()
            .credentials(credentials())
            .space_uuid("space-1")
            .order_cache(shared.clone())
            .build()
            .unwrap();
        let clone = client.clone();
        assert!(Arc::ptr_eq(client.order_cache(), &shared));
        assert!(Arc::ptr_eq(clone.order_cache(), &shared));
        assert_eq!(clone.require_space().unwrap(), "space-1");
    }
}
