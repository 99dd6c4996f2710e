//! # lemon.markets client
//!
//! An async Rust client for the lemon.markets paper-trading REST API.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared types, domain models, error taxonomy
//! 2. **Auth** — Client credentials and bearer-token refresh
//! 3. **HTTP API** — `LemonHttp` with per-request retry policies and a pager
//! 4. **High-Level Client** — `LemonClient` with nested sub-clients, caching,
//!    and the status-partitioned order cache
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lemon_markets::prelude::*;
//!
//! let client = LemonClient::builder()
//!     .credentials(Credentials::new("client-id", "client-secret"))
//!     .space_uuid("space-uuid")
//!     .build()?;
//!
//! let tesla = client.instruments().resolve("US88160R1014").await?;
//! let order = client
//!     .orders()
//!     .create(NewOrder::new(tesla, Side::Buy, 1, valid_until))
//!     .await?;
//! client.orders().list(&OrderFilter::with_status(OrderStatus::Executed)).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared types used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Authentication: credentials, tokens, refresh.
pub mod auth;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies and paging.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `LemonClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    pub use crate::shared::Side;

    // Domain types
    pub use crate::domain::instrument::{Instrument, InstrumentFilter, InstrumentType};
    pub use crate::domain::order::{NewOrder, Order, OrderCache, OrderFilter, OrderStatus};
    pub use crate::domain::position::Position;
    pub use crate::domain::space::{Space, SpaceState, SpaceType};
    pub use crate::domain::venue::{OpeningDay, TradingVenue};

    // Errors
    pub use crate::error::{AuthError, HttpError, SdkError};

    // Network
    pub use crate::network::{Environment, DEFAULT_DATA_API_URL, DEFAULT_PAPER_API_URL};

    // Auth
    pub use crate::auth::{Credentials, Token, TokenType};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        AuthClient, InstrumentsClient, LemonClient, LemonClientBuilder, OrdersClient,
        PortfolioClient, SpacesClient, VenuesClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
