//! Wire types for portfolio responses.

use crate::domain::order::wire::InstrumentRef;
use crate::shared::serde_util;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct PositionResponse {
    pub instrument: InstrumentRef,
    pub quantity: u64,
    #[serde(with = "serde_util::decimal")]
    pub average_price: Decimal,
    #[serde(with = "serde_util::decimal")]
    pub latest_total_value: Decimal,
}
