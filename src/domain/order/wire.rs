//! Wire types for order REST requests and responses.

use super::OrderStatus;
use crate::domain::instrument::InstrumentType;
use crate::shared::{serde_util, Side};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Instrument reference embedded in order and position records.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct InstrumentRef {
    pub isin: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Full order record (create response, list entries).
#[derive(Deserialize, Debug, Clone)]
pub struct OrderResponse {
    pub uuid: String,
    pub status: OrderStatus,
    pub quantity: u64,
    pub side: Side,
    #[serde(with = "serde_util::timestamp_secs")]
    pub valid_until: DateTime<Utc>,
    #[serde(default, with = "serde_util::decimal_opt")]
    pub limit_price: Option<Decimal>,
    #[serde(default, with = "serde_util::decimal_opt")]
    pub stop_price: Option<Decimal>,
    #[serde(default, with = "serde_util::timestamp_secs_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "serde_util::timestamp_secs_opt")]
    pub processed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub processed_quantity: Option<u64>,
    #[serde(default, with = "serde_util::decimal_opt")]
    pub average_price: Option<Decimal>,
    #[serde(default, rename = "type")]
    pub instrument_type: Option<InstrumentType>,
    #[serde(default)]
    pub instrument: Option<InstrumentRef>,
    #[serde(default)]
    pub trading_venue: Option<serde_json::Value>,
}

/// Mutable order fields (single-order GET, activate response).
#[derive(Deserialize, Debug, Clone)]
pub struct OrderUpdate {
    pub status: OrderStatus,
    #[serde(default, with = "serde_util::timestamp_secs_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "serde_util::timestamp_secs_opt")]
    pub processed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub processed_quantity: Option<u64>,
    #[serde(default, with = "serde_util::decimal_opt")]
    pub average_price: Option<Decimal>,
    #[serde(default, rename = "type")]
    pub instrument_type: Option<InstrumentType>,
    #[serde(default)]
    pub trading_venue: Option<serde_json::Value>,
}

/// Form body for `POST spaces/{space}/orders/`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreateOrderBody<'a> {
    pub isin: &'a str,
    pub valid_until: i64,
    pub side: Side,
    pub quantity: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_response_deserialize() {
        let json = r#"{
            "uuid": "abc",
            "status": "activated",
            "quantity": 10,
            "side": "buy",
            "valid_until": 1633046400,
            "limit_price": 120.5,
            "stop_price": null,
            "average_price": "0",
            "type": "stock",
            "instrument": {"isin": "US88160R1014", "title": "TESLA INC"},
            "trading_venue": {"mic": "XMUN"}
        }"#;
        let order: OrderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(order.uuid, "abc");
        assert_eq!(order.status, OrderStatus::Activated);
        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.limit_price, Some(Decimal::new(1205, 1)));
        assert!(order.stop_price.is_none());
        assert!(order.created_at.is_none());
        assert_eq!(order.instrument_type, Some(InstrumentType::Stock));
        assert_eq!(order.instrument.unwrap().isin, "US88160R1014");
    }

    #[test]
    fn test_order_response_requires_core_fields() {
        let missing_uuid = r#"{"status": "activated", "quantity": 1, "side": "buy", "valid_until": 0}"#;
        assert!(serde_json::from_str::<OrderResponse>(missing_uuid).is_err());
        let missing_status = r#"{"uuid": "a", "quantity": 1, "side": "buy", "valid_until": 0}"#;
        assert!(serde_json::from_str::<OrderResponse>(missing_status).is_err());
    }

    #[test]
    fn test_order_update_only_needs_status() {
        let update: OrderUpdate = serde_json::from_str(r#"{"status": "executed", "processed_quantity": 10}"#).unwrap();
        assert_eq!(update.status, OrderStatus::Executed);
        assert_eq!(update.processed_quantity, Some(10));
    }

    #[test]
    fn test_create_body_skips_absent_prices() {
        let body = CreateOrderBody {
            isin: "US88160R1014",
            valid_until: 1633046400,
            side: Side::Buy,
            quantity: 2,
            stop_price: None,
            limit_price: Some(Decimal::new(1205, 1)),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["side"], "buy");
        assert_eq!(json["limit_price"], "120.5");
        assert!(json.get("stop_price").is_none());
    }
}
