//! Instruments sub-client — search, resolve by ISIN, cache.

use crate::client::LemonClient;
use crate::domain::instrument::{Instrument, InstrumentFilter};
use crate::error::SdkError;

/// Sub-client for instrument lookups on the market-data API.
pub struct Instruments<'a> {
    pub(crate) client: &'a LemonClient,
}

impl<'a> Instruments<'a> {
    /// List every instrument matching `filter`.
    pub async fn list(&self, filter: &InstrumentFilter) -> Result<Vec<Instrument>, SdkError> {
        let endpoint = self.client.data_endpoint("instruments/");
        let instruments: Vec<Instrument> = self
            .client
            .http
            .fetch_all(&endpoint, &filter.to_query())
            .await?;
        self.cache_all(&instruments).await;
        Ok(instruments)
    }

    /// Resolve an instrument by ISIN. Uses the instrument cache.
    ///
    /// Searches by ISIN on a miss, preferring an exact ISIN match over the
    /// first search hit.
    pub async fn resolve(&self, isin: &str) -> Result<Instrument, SdkError> {
        if let Some(instrument) = self.client.instrument_cache.read().await.get(isin) {
            return Ok(instrument.clone());
        }

        let candidates = self.list(&InstrumentFilter::search(isin)).await?;
        let found = candidates
            .iter()
            .find(|i| i.isin.eq_ignore_ascii_case(isin))
            .or_else(|| candidates.first())
            .cloned()
            .ok_or_else(|| SdkError::NotFound(format!("Instrument not found: {}", isin)))?;

        self.client
            .instrument_cache
            .write()
            .await
            .insert(isin.to_string(), found.clone());
        Ok(found)
    }

    /// Invalidate a cached instrument by ISIN.
    pub async fn invalidate(&self, isin: &str) {
        self.client.instrument_cache.write().await.remove(isin);
    }

    /// Clear the instrument cache.
    pub async fn clear_cache(&self) {
        self.client.instrument_cache.write().await.clear();
    }

    async fn cache_all(&self, instruments: &[Instrument]) {
        let mut cache = self.client.instrument_cache.write().await;
        for instrument in instruments {
            cache.insert(instrument.isin.clone(), instrument.clone());
        }
    }
}
