//! Venues sub-client — venue listing and opening days.

use crate::client::LemonClient;
use crate::domain::venue::{opening_day_for, OpeningDay, TradingVenue};
use crate::error::SdkError;
use chrono::Utc;

pub struct Venues<'a> {
    pub(crate) client: &'a LemonClient,
}

impl<'a> Venues<'a> {
    pub async fn list(&self) -> Result<Vec<TradingVenue>, SdkError> {
        let endpoint = self.client.data_endpoint("venues/");
        self.client.http.fetch_all(&endpoint, &[]).await
    }

    pub async fn opening_days(&self, mic: &str) -> Result<Vec<OpeningDay>, SdkError> {
        let endpoint = self.client.data_endpoint(&format!(
            "venues/{}/opening-days/",
            urlencoding::encode(mic)
        ));
        self.client.http.fetch_all(&endpoint, &[]).await
    }

    /// Whether the venue is open right now, per its published opening days.
    pub async fn is_open(&self, mic: &str) -> Result<bool, SdkError> {
        let now = Utc::now();
        let days = self.opening_days(mic).await?;
        Ok(opening_day_for(&days, now)
            .map(|d| d.is_open_at(now))
            .unwrap_or(false))
    }
}
