//! Spaces sub-client — list, fetch with TTL cache.

use crate::client::LemonClient;
use crate::domain::space::Space;
use crate::error::SdkError;
use std::time::Instant;

pub struct Spaces<'a> {
    pub(crate) client: &'a LemonClient,
}

impl<'a> Spaces<'a> {
    pub async fn list(&self) -> Result<Vec<Space>, SdkError> {
        let spaces: Vec<Space> = self.client.http.fetch_all("spaces/", &[]).await?;
        let now = Instant::now();
        let mut cache = self.client.space_cache.write().await;
        for space in &spaces {
            cache.insert(space.uuid.clone(), (space.clone(), now));
        }
        Ok(spaces)
    }

    /// Get a space by uuid. Uses TTL cache, so balance and cash-to-invest
    /// can lag the server by up to `space_cache_ttl`.
    pub async fn get(&self, uuid: &str) -> Result<Space, SdkError> {
        {
            let cache = self.client.space_cache.read().await;
            if let Some((space, fetched_at)) = cache.get(uuid) {
                if fetched_at.elapsed() < self.client.space_cache_ttl {
                    return Ok(space.clone());
                }
            }
        }

        let endpoint = format!("spaces/{}/", urlencoding::encode(uuid));
        let space: Space = self.client.http.get(&endpoint, &[]).await?;
        self.client
            .space_cache
            .write()
            .await
            .insert(uuid.to_string(), (space.clone(), Instant::now()));
        Ok(space)
    }

    /// The space orders and positions are scoped to.
    pub async fn current(&self) -> Result<Space, SdkError> {
        let uuid = self.client.require_space()?.to_string();
        self.get(&uuid).await
    }

    pub async fn invalidate(&self, uuid: &str) {
        self.client.space_cache.write().await.remove(uuid);
    }
}
