//! Position domain — portfolio positions within a space.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

use crate::domain::instrument::Instrument;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A position held in the space's portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub instrument: Instrument,
    pub quantity: u64,
    pub average_price: Decimal,
    pub latest_total_value: Decimal,
}

impl Position {
    pub fn from_wire(instrument: Instrument, wire: wire::PositionResponse) -> Self {
        Self {
            instrument,
            quantity: wire.quantity,
            average_price: wire.average_price,
            latest_total_value: wire.latest_total_value,
        }
    }
}
