//! Order cache — orders indexed by last known status, then uuid.
//!
//! Each uuid lives in at most one status bucket: the one matching the status
//! the server last reported for it. `insert` enforces this by evicting any
//! stale entry for the same uuid before filing the order.
//!
//! Status-changing sequences (remove → network call → insert) must hold the
//! uuid's lock from [`OrderCache::lock`] so two of them never interleave on
//! the same order. A listing files orders it cannot name in advance, so it
//! takes [`OrderCache::lock_all`] instead, which excludes every uuid lock.
//! Reads return snapshots and never block on the network.

use super::{Order, OrderStatus};

use async_lock::{Mutex, MutexGuardArc, RwLock, RwLockReadGuardArc, RwLockWriteGuardArc};
use std::collections::HashMap;
use std::sync::Arc;

type Buckets = HashMap<OrderStatus, HashMap<String, Order>>;

pub struct OrderCache {
    buckets: RwLock<Buckets>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    /// Read by every uuid lock, written by `lock_all`.
    listing: Arc<RwLock<()>>,
}

/// Held for the duration of one uuid's status-changing sequence.
pub struct OrderGuard {
    _order: MutexGuardArc<()>,
    _listing: RwLockReadGuardArc<()>,
}

impl OrderCache {
    pub fn new() -> Self {
        let buckets = OrderStatus::ALL
            .iter()
            .map(|status| (*status, HashMap::new()))
            .collect();
        Self {
            buckets: RwLock::new(buckets),
            locks: Mutex::new(HashMap::new()),
            listing: Arc::new(RwLock::new(())),
        }
    }

    /// Exclusive access to one uuid's cache entry for the duration of a
    /// status-changing sequence.
    ///
    /// Do not take a second uuid lock while holding one: a waiting
    /// `lock_all` blocks it.
    pub async fn lock(&self, uuid: &str) -> OrderGuard {
        let listing = self.listing.read_arc().await;
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(uuid.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        OrderGuard {
            _order: lock.lock_arc().await,
            _listing: listing,
        }
    }

    /// Exclusive access to every uuid. Waits for all held uuid locks to be
    /// released and blocks new ones until dropped.
    pub async fn lock_all(&self) -> RwLockWriteGuardArc<()> {
        self.listing.write_arc().await
    }

    /// File `order` under its current status, evicting any entry for the same
    /// uuid from every other bucket. Returns the status it was previously
    /// filed under.
    pub async fn insert(&self, order: Order) -> Option<OrderStatus> {
        let mut buckets = self.buckets.write().await;
        let previous = remove_from(&mut buckets, &order.uuid).map(|o| o.status);
        if previous != Some(order.status) {
            tracing::debug!(
                uuid = %order.uuid,
                from = ?previous,
                to = %order.status,
                "Order reclassified"
            );
        }
        buckets
            .entry(order.status)
            .or_default()
            .insert(order.uuid.clone(), order);
        previous
    }

    /// Remove and return the order with `uuid` from whichever bucket holds it.
    pub async fn remove(&self, uuid: &str) -> Option<Order> {
        remove_from(&mut *self.buckets.write().await, uuid)
    }

    pub async fn get(&self, uuid: &str) -> Option<Order> {
        self.buckets
            .read()
            .await
            .values()
            .find_map(|bucket| bucket.get(uuid).cloned())
    }

    /// Status bucket currently holding `uuid`.
    pub async fn status_of(&self, uuid: &str) -> Option<OrderStatus> {
        self.buckets
            .read()
            .await
            .iter()
            .find(|(_, bucket)| bucket.contains_key(uuid))
            .map(|(status, _)| *status)
    }

    pub async fn contains(&self, status: OrderStatus, uuid: &str) -> bool {
        self.buckets
            .read()
            .await
            .get(&status)
            .map(|bucket| bucket.contains_key(uuid))
            .unwrap_or(false)
    }

    /// Snapshot of one bucket.
    pub async fn bucket(&self, status: OrderStatus) -> HashMap<String, Order> {
        self.buckets
            .read()
            .await
            .get(&status)
            .cloned()
            .unwrap_or_default()
    }

    /// Snapshot of every bucket.
    pub async fn snapshot(&self) -> HashMap<OrderStatus, HashMap<String, Order>> {
        self.buckets.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.buckets.read().await.values().map(HashMap::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every order in a terminal bucket (executed, deleted, expired).
    /// Non-terminal buckets are untouched. Returns the number of orders removed.
    pub async fn prune(&self) -> usize {
        let mut pruned: Vec<String> = Vec::new();
        {
            let mut buckets = self.buckets.write().await;
            for status in OrderStatus::TERMINAL {
                if let Some(bucket) = buckets.get_mut(&status) {
                    pruned.extend(bucket.drain().map(|(uuid, _)| uuid));
                }
            }
        }

        let mut locks = self.locks.lock().await;
        for uuid in &pruned {
            if locks.get(uuid).is_some_and(|l| Arc::strong_count(l) == 1) {
                locks.remove(uuid);
            }
        }

        tracing::debug!(count = pruned.len(), "Pruned terminal orders");
        pruned.len()
    }

    /// Remove every order, and every uuid lock nobody holds.
    pub async fn clear(&self) {
        for bucket in self.buckets.write().await.values_mut() {
            bucket.clear();
        }
        self.locks
            .lock()
            .await
            .retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    #[cfg(test)]
    async fn lock_entries(&self) -> usize {
        self.locks.lock().await.len()
    }
}

impl Default for OrderCache {
    fn default() -> Self {
        Self::new()
    }
}

fn remove_from(buckets: &mut Buckets, uuid: &str) -> Option<Order> {
    buckets.values_mut().find_map(|bucket| bucket.remove(uuid))
}
