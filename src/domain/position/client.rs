//! Portfolio sub-client — positions in the configured space.

use crate::client::LemonClient;
use crate::domain::position::wire::PositionResponse;
use crate::domain::position::Position;
use crate::error::SdkError;

pub struct Portfolio<'a> {
    pub(crate) client: &'a LemonClient,
}

impl<'a> Portfolio<'a> {
    /// All positions, each with its instrument resolved by ISIN.
    pub async fn positions(&self) -> Result<Vec<Position>, SdkError> {
        let endpoint = format!(
            "spaces/{}/portfolio/",
            urlencoding::encode(self.client.require_space()?)
        );
        let rows: Vec<PositionResponse> = self.client.http.fetch_all(&endpoint, &[]).await?;

        let instruments = self.client.instruments();
        let mut positions = Vec::with_capacity(rows.len());
        for row in rows {
            let instrument = instruments.resolve(&row.instrument.isin).await?;
            positions.push(Position::from_wire(instrument, row));
        }
        Ok(positions)
    }
}
