//! Instrument domain — tradable securities identified by ISIN.

#[cfg(feature = "http")]
pub mod client;

use crate::domain::venue::TradingVenue;
use serde::{Deserialize, Serialize};

// ─── InstrumentType ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentType {
    Stock,
    Bond,
    Fund,
    Warrant,
}

impl InstrumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::Bond => "bond",
            Self::Fund => "fund",
            Self::Warrant => "warrant",
        }
    }
}

impl std::fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Instrument ──────────────────────────────────────────────────────────────

/// An instrument as returned by the market-data API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub isin: String,
    #[serde(default)]
    pub wkn: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub instrument_type: InstrumentType,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub tradable: Option<bool>,
    #[serde(default)]
    pub venues: Vec<TradingVenue>,
}

// ─── InstrumentFilter ────────────────────────────────────────────────────────

/// Query parameters for `instruments/`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstrumentFilter {
    pub search: Option<String>,
    pub tradable: Option<bool>,
    pub currency: Option<String>,
    pub instrument_type: Option<InstrumentType>,
}

impl InstrumentFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(s) = &self.search {
            params.push(("search", s.clone()));
        }
        if let Some(t) = self.tradable {
            params.push(("tradable", t.to_string()));
        }
        if let Some(c) = &self.currency {
            params.push(("currency", c.clone()));
        }
        if let Some(t) = self.instrument_type {
            params.push(("type", t.as_str().to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_deserialize() {
        let json = r#"{
            "isin": "US88160R1014",
            "wkn": "A1CX3T",
            "name": "TESLA INC.",
            "title": "TESLA INC",
            "type": "stock",
            "symbol": "TL0",
            "currency": "EUR",
            "tradable": true,
            "venues": [{"name": "Börse München - Gettex", "title": "Gettex", "mic": "XMUN", "currency": "EUR"}]
        }"#;
        let instrument: Instrument = serde_json::from_str(json).unwrap();
        assert_eq!(instrument.isin, "US88160R1014");
        assert_eq!(instrument.instrument_type, InstrumentType::Stock);
        assert_eq!(instrument.tradable, Some(true));
        assert_eq!(instrument.venues.len(), 1);
        assert_eq!(instrument.venues[0].mic, "XMUN");
    }

    #[test]
    fn test_unknown_instrument_type_rejected() {
        let json = r#"{"isin": "X", "type": "crypto"}"#;
        assert!(serde_json::from_str::<Instrument>(json).is_err());
    }

    #[test]
    fn test_filter_query() {
        let filter = InstrumentFilter {
            search: Some("tesla".into()),
            tradable: Some(true),
            currency: None,
            instrument_type: Some(InstrumentType::Stock),
        };
        assert_eq!(
            filter.to_query(),
            vec![
                ("search", "tesla".to_string()),
                ("tradable", "true".to_string()),
                ("type", "stock".to_string()),
            ]
        );
        assert!(InstrumentFilter::default().to_query().is_empty());
    }
}
