//! Space domain — account subdivisions that scope orders and positions.

#[cfg(feature = "http")]
pub mod client;

use crate::shared::serde_util;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceType {
    Strategy,
    App,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceState {
    #[serde(with = "serde_util::decimal")]
    pub balance: Decimal,
    #[serde(with = "serde_util::decimal")]
    pub cash_to_invest: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub uuid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub space_type: SpaceType,
    pub state: SpaceState,
}
