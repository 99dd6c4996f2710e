//! Order domain — orders, lifecycle status, status-partitioned cache.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::domain::instrument::{Instrument, InstrumentType};
use crate::shared::serde_util::to_timestamp_secs;
use crate::shared::Side;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use state::OrderCache;

// ─── OrderStatus ─────────────────────────────────────────────────────────────

/// Server-reported order status.
///
/// Typical progression is `Inactive → Activated → InProgress → {Executed,
/// Deleted, Expired}`, but transitions are driven by the server only; the
/// client records whatever status it was last told.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Inactive,
    Activated,
    InProgress,
    Executed,
    Deleted,
    Expired,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Inactive,
        OrderStatus::Activated,
        OrderStatus::InProgress,
        OrderStatus::Executed,
        OrderStatus::Deleted,
        OrderStatus::Expired,
    ];

    pub const TERMINAL: [OrderStatus; 3] = [
        OrderStatus::Executed,
        OrderStatus::Deleted,
        OrderStatus::Expired,
    ];

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Executed | Self::Deleted | Self::Expired)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Activated => "activated",
            Self::InProgress => "in_progress",
            Self::Executed => "executed",
            Self::Deleted => "deleted",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Order ───────────────────────────────────────────────────────────────────

/// An order as last reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub uuid: String,
    pub instrument: Instrument,
    pub quantity: u64,
    pub side: Side,
    pub limit_price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub valid_until: DateTime<Utc>,
    pub status: OrderStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_quantity: Option<u64>,
    pub average_price: Option<Decimal>,
    pub instrument_type: Option<InstrumentType>,
    /// Venue details as sent by the server.
    pub trading_venue: Option<serde_json::Value>,
}

// ─── NewOrder ────────────────────────────────────────────────────────────────

/// Parameters for placing an order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub instrument: Instrument,
    pub valid_until: DateTime<Utc>,
    pub side: Side,
    pub quantity: u64,
    pub stop_price: Option<Decimal>,
    pub limit_price: Option<Decimal>,
}

impl NewOrder {
    pub fn new(instrument: Instrument, side: Side, quantity: u64, valid_until: DateTime<Utc>) -> Self {
        Self {
            instrument,
            valid_until,
            side,
            quantity,
            stop_price: None,
            limit_price: None,
        }
    }

    pub fn limit_price(mut self, price: Decimal) -> Self {
        self.limit_price = Some(price);
        self
    }

    pub fn stop_price(mut self, price: Decimal) -> Self {
        self.stop_price = Some(price);
        self
    }

    pub(crate) fn body(&self) -> wire::CreateOrderBody<'_> {
        wire::CreateOrderBody {
            isin: &self.instrument.isin,
            valid_until: to_timestamp_secs(&self.valid_until),
            side: self.side,
            quantity: self.quantity,
            stop_price: self.stop_price,
            limit_price: self.limit_price,
        }
    }
}

// ─── OrderFilter ─────────────────────────────────────────────────────────────

/// Filters for listing orders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub created_at_from: Option<DateTime<Utc>>,
    pub created_at_until: Option<DateTime<Utc>>,
    pub side: Option<Side>,
    pub instrument_type: Option<InstrumentType>,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn with_status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(until) = &self.created_at_until {
            params.push(("created_at_until", to_timestamp_secs(until).to_string()));
        }
        if let Some(from) = &self.created_at_from {
            params.push(("created_at_from", to_timestamp_secs(from).to_string()));
        }
        if let Some(side) = self.side {
            params.push(("side", side.as_str().to_string()));
        }
        if let Some(t) = self.instrument_type {
            params.push(("type", t.as_str().to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_serde() {
        let s: OrderStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(s, OrderStatus::InProgress);
        assert_eq!(serde_json::to_string(&OrderStatus::Activated).unwrap(), "\"activated\"");
        assert!(serde_json::from_str::<OrderStatus>("\"open\"").is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        for status in OrderStatus::ALL {
            assert_eq!(status.is_terminal(), OrderStatus::TERMINAL.contains(&status));
        }
        assert!(!OrderStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_filter_query() {
        let filter = OrderFilter {
            created_at_from: Some(Utc.with_ymd_and_hms(2021, 10, 1, 0, 0, 0).unwrap()),
            created_at_until: None,
            side: Some(Side::Sell),
            instrument_type: None,
            status: Some(OrderStatus::Executed),
        };
        assert_eq!(
            filter.to_query(),
            vec![
                ("created_at_from", "1633046400".to_string()),
                ("side", "sell".to_string()),
                ("status", "executed".to_string()),
            ]
        );
    }
}
