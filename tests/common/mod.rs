//! Shared fixtures for the integration tests: an in-process mock of the
//! auth, trading and market-data APIs, and a client pointed at it.

#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};

use lemon_markets::auth::Credentials;
use lemon_markets::client::{LemonClient, LemonClientBuilder};

pub const TOKEN: &str = "test-token";
pub const BEARER: &str = "Bearer test-token";
pub const SPACE: &str = "space-1";
pub const TSLA: &str = "US88160R1014";
pub const AAPL: &str = "US0378331005";

pub const TOKEN_PATH: &str = "/oauth2/token";
pub const API_PREFIX: &str = "/rest/v1";
pub const DATA_PREFIX: &str = "/data/v1";

pub fn orders_path() -> String {
    format!("{}/spaces/{}/orders/", API_PREFIX, SPACE)
}

pub fn order_path(uuid: &str) -> String {
    format!("{}{}/", orders_path(), uuid)
}

/// Builder wired to `server` for all three APIs.
pub fn builder(server: &MockServer) -> LemonClientBuilder {
    LemonClient::builder()
        .credentials(Credentials::new("client-id", "client-secret"))
        .auth_url(&server.url(TOKEN_PATH))
        .base_url(&server.url(format!("{}/", API_PREFIX)))
        .data_url(&server.url(format!("{}/", DATA_PREFIX)))
        .space_uuid(SPACE)
}

pub fn client(server: &MockServer) -> LemonClient {
    builder(server).build().unwrap()
}

/// Token endpoint issuing `TOKEN` valid for `expires_in` seconds.
pub async fn mock_token(server: &MockServer, expires_in: i64) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(TOKEN_PATH)
                .x_www_form_urlencoded_tuple("grant_type", "client_credentials")
                .x_www_form_urlencoded_tuple("client_id", "client-id")
                .x_www_form_urlencoded_tuple("client_secret", "client-secret");
            then.status(200).json_body(json!({
                "access_token": TOKEN,
                "token_type": "bearer",
                "expires_in": expires_in
            }));
        })
        .await
}

/// Instrument search on the data API answering for `isin`.
pub async fn mock_instrument<'a>(server: &'a MockServer, isin: &str) -> Mock<'a> {
    let body = json!({
        "results": [instrument_json(isin)],
        "next": null
    });
    let isin = isin.to_string();
    server
        .mock_async(move |when, then| {
            when.method(GET)
                .path(format!("{}/instruments/", DATA_PREFIX))
                .query_param("search", isin.as_str());
            then.status(200).json_body(body);
        })
        .await
}

pub fn instrument_json(isin: &str) -> Value {
    json!({
        "isin": isin,
        "wkn": "A1CX3T",
        "title": "TEST INSTRUMENT",
        "type": "stock",
        "symbol": "TST",
        "currency": "EUR",
        "tradable": true,
        "venues": [{"mic": "XMUN", "title": "Gettex", "currency": "EUR"}]
    })
}

/// Full order record as the trading API returns it.
pub fn order_json(uuid: &str, isin: &str, status: &str) -> Value {
    json!({
        "uuid": uuid,
        "isin": isin,
        "instrument": {"isin": isin, "title": "TEST INSTRUMENT"},
        "valid_until": 1_893_456_000,
        "side": "buy",
        "quantity": 10,
        "stop_price": null,
        "limit_price": "120.5",
        "status": status,
        "type": "stock",
        "created_at": 1_633_046_400
    })
}
