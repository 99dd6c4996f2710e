//! Shared newtypes and utilities used across all domain modules.

pub mod serde_util;

use serde::{Deserialize, Serialize};

// ─── Side ────────────────────────────────────────────────────────────────────

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_serde() {
        let buy: Side = serde_json::from_str("\"buy\"").unwrap();
        assert_eq!(buy, Side::Buy);
        let sell: Side = serde_json::from_str("\"sell\"").unwrap();
        assert_eq!(sell, Side::Sell);
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), "\"buy\"");
    }

    #[test]
    fn test_side_rejects_unknown() {
        assert!(serde_json::from_str::<Side>("\"bid\"").is_err());
    }
}
