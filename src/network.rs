//! Network URL constants for the lemon.markets API.

use serde::{Deserialize, Serialize};

/// Paper-trading REST API base URL.
pub const DEFAULT_PAPER_API_URL: &str = "https://paper-trading.lemon.markets/rest/v1/";

/// Real-money REST API base URL. Not supported by this client.
pub const DEFAULT_MONEY_API_URL: &str = "https://trading.lemon.markets/rest/v1/";

/// Market-data REST API base URL (instruments, venues).
pub const DEFAULT_DATA_API_URL: &str = "https://paper-data.lemon.markets/v1/";

/// OAuth2 token endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://auth.lemon.markets/oauth2/token";

const MONEY_HOST: &str = "trading.lemon.markets";

/// Which trading environment the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Paper,
    Money,
}

impl Environment {
    pub fn api_url(&self) -> &'static str {
        match self {
            Self::Paper => DEFAULT_PAPER_API_URL,
            Self::Money => DEFAULT_MONEY_API_URL,
        }
    }
}

/// Whether `url` points at the real-money trading host.
pub fn is_money_url(url: &str) -> bool {
    let without_scheme = url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let host = without_scheme.split(['/', ':']).next().unwrap_or_default();
    host.eq_ignore_ascii_case(MONEY_HOST)
}
