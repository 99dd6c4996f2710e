//! Orders sub-client — create, activate, refresh, delete, list.
//!
//! Every operation keeps the shared [`OrderCache`] in step with what the
//! server reported. Status-changing calls take the order out of its bucket,
//! talk to the server, and file it under the returned status, all while
//! holding that uuid's cache lock. If the server call fails the order is put
//! back where it was, so a failed call never loses a cached order.

use crate::client::LemonClient;
use crate::domain::order::wire::{OrderResponse, OrderUpdate};
use crate::domain::order::{NewOrder, Order, OrderCache, OrderFilter, OrderStatus};
use crate::error::{HttpError, SdkError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Refresh,
    Activate,
    Delete,
}

pub struct Orders<'a> {
    pub(crate) client: &'a LemonClient,
}

impl<'a> Orders<'a> {
    /// The cache this sub-client maintains.
    pub fn cache(&self) -> &OrderCache {
        &self.client.order_cache
    }

    /// Place an order in the configured space and file it under the status
    /// the server assigned (normally inactive or activated).
    ///
    /// A 4xx rejection from the server surfaces as [`SdkError::Validation`].
    pub async fn create(&self, request: NewOrder) -> Result<Order, SdkError> {
        let endpoint = self.orders_endpoint()?;
        let record: OrderResponse = self
            .client
            .http
            .post(&endpoint, &request.body())
            .await
            .map_err(rejection)?;

        let order = Order::from_wire(request.instrument, record);
        let cache = self.cache();
        let _guard = cache.lock(&order.uuid).await;
        cache.insert(order.clone()).await;
        tracing::debug!(uuid = %order.uuid, status = %order.status, "Order created");
        Ok(order)
    }

    /// Re-fetch `order` and update it in place.
    ///
    /// Returns whether its status bucket changed, and the new status.
    pub async fn refresh(&self, order: &mut Order) -> Result<(bool, OrderStatus), SdkError> {
        self.transition(order, Transition::Refresh).await
    }

    /// Activate an inactive order. Returns `true` iff the server now reports
    /// it as activated.
    pub async fn activate(&self, order: &mut Order) -> Result<bool, SdkError> {
        let (_, status) = self.transition(order, Transition::Activate).await?;
        Ok(status == OrderStatus::Activated)
    }

    /// Delete `order`, then re-fetch it to learn the terminal status the
    /// server settled on (usually deleted, possibly expired or executed).
    ///
    /// If the delete is accepted but the re-fetch fails, the order is filed
    /// back under its pre-delete status and the error is returned; a later
    /// `refresh` or `list` reconciles it.
    pub async fn delete(&self, order: &mut Order) -> Result<(bool, OrderStatus), SdkError> {
        self.transition(order, Transition::Delete).await
    }

    /// List every order matching `filter` and file each under its current
    /// status, replacing any stale cache entry for the same uuid.
    ///
    /// Runs exclusively with every other status-changing call, from the
    /// first page request until the last order is filed, so it never files
    /// a snapshot older than a concurrent refresh, activate or delete.
    /// Instruments are resolved by ISIN before the cache is touched, so a
    /// failed listing leaves the cache unchanged.
    pub async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, SdkError> {
        let endpoint = self.orders_endpoint()?;
        let cache = self.cache();
        let _exclusive = cache.lock_all().await;

        let records: Vec<OrderResponse> = self
            .client
            .http
            .fetch_all(&endpoint, &filter.to_query())
            .await?;

        let instruments = self.client.instruments();
        let mut orders = Vec::with_capacity(records.len());
        for record in records {
            let isin = record
                .instrument
                .as_ref()
                .map(|i| i.isin.clone())
                .ok_or_else(|| {
                    SdkError::Validation(format!("Order {} has no instrument", record.uuid))
                })?;
            let instrument = instruments.resolve(&isin).await?;
            orders.push(Order::from_wire(instrument, record));
        }

        for order in &orders {
            cache.insert(order.clone()).await;
        }
        tracing::debug!(count = orders.len(), "Orders listed");
        Ok(orders)
    }

    /// Drop executed, deleted and expired orders from the cache.
    pub async fn prune(&self) -> usize {
        self.cache().prune().await
    }

    // ── Internal ─────────────────────────────────────────────────────────

    async fn transition(
        &self,
        order: &mut Order,
        transition: Transition,
    ) -> Result<(bool, OrderStatus), SdkError> {
        let endpoint = self.order_endpoint(&order.uuid)?;
        let cache = self.cache();
        let _guard = cache.lock(&order.uuid).await;

        let previous = cache.remove(&order.uuid).await;
        let old_status = previous.as_ref().map_or(order.status, |o| o.status);

        match self.send_transition(&endpoint, transition).await {
            Ok(update) => {
                order.apply_update(update);
                cache.insert(order.clone()).await;
                tracing::debug!(
                    uuid = %order.uuid,
                    ?transition,
                    from = %old_status,
                    to = %order.status,
                    "Order reconciled"
                );
                Ok((old_status != order.status, order.status))
            }
            Err(e) => {
                if let Some(previous) = previous {
                    cache.insert(previous).await;
                }
                Err(e)
            }
        }
    }

    async fn send_transition(
        &self,
        endpoint: &str,
        transition: Transition,
    ) -> Result<OrderUpdate, SdkError> {
        let http = &self.client.http;
        match transition {
            Transition::Refresh => http.get(endpoint, &[]).await,
            Transition::Activate => http.put(&format!("{}activate/", endpoint)).await,
            Transition::Delete => {
                http.delete(endpoint).await?;
                http.get(endpoint, &[]).await
            }
        }
    }

    fn orders_endpoint(&self) -> Result<String, SdkError> {
        Ok(format!(
            "spaces/{}/orders/",
            urlencoding::encode(self.client.require_space()?)
        ))
    }

    fn order_endpoint(&self, uuid: &str) -> Result<String, SdkError> {
        Ok(format!(
            "{}{}/",
            self.orders_endpoint()?,
            urlencoding::encode(uuid)
        ))
    }
}

/// Map a client-side rejection of an order onto a validation error.
fn rejection(err: SdkError) -> SdkError {
    match err {
        SdkError::Http(HttpError::Api { status, message })
            if (400..500).contains(&status) && !matches!(status, 401 | 403 | 429) =>
        {
            SdkError::Validation(format!("Order rejected ({}): {}", status, message))
        }
        other => other,
    }
}
