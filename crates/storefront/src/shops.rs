//! Server-side visitor shops.
//!
//! Each visitor's [`Shop`] lives here behind its own mutex, keyed by a
//! random id stored in their session. Every mutation runs under that lock,
//! so overlapping requests from one visitor (a double click, two tabs) are
//! applied one after the other instead of overwriting each other.
//!
//! Shops are held in a `moka` cache bounded by entry count and idle time,
//! matching the session store's limits.

use std::sync::Arc;
use std::time::Duration;

use abyssinia_core::Shop;
use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Identifier tying a session to its shop.
pub type ShopId = Uuid;

/// All live visitor shops.
///
/// Cheaply cloneable; clones share the same cache.
#[derive(Clone)]
pub struct ShopRegistry {
    shops: Cache<ShopId, Arc<Mutex<Shop>>>,
}

impl ShopRegistry {
    /// Create a registry holding at most `max_shops` shops, each dropped
    /// after `idle` without access.
    #[must_use]
    pub fn new(max_shops: u64, idle: Duration) -> Self {
        let shops = Cache::builder()
            .max_capacity(max_shops)
            .time_to_idle(idle)
            .build();

        Self { shops }
    }

    /// The shop for `id`, created empty on first use.
    ///
    /// Concurrent first uses of the same id share one shop.
    async fn handle(&self, id: ShopId) -> Arc<Mutex<Shop>> {
        self.shops
            .get_with(id, async { Arc::new(Mutex::new(Shop::new())) })
            .await
    }

    /// Copy of the shop's current state. Unknown or expired ids read as a
    /// fresh shop without creating one.
    pub async fn snapshot(&self, id: ShopId) -> Shop {
        match self.shops.get(&id).await {
            Some(shop) => shop.lock().await.clone(),
            None => Shop::new(),
        }
    }

    /// Apply `mutate` to the shop while holding its lock.
    ///
    /// Returns the mutation's result and the state it left behind.
    pub async fn update<R>(&self, id: ShopId, mutate: impl FnOnce(&mut Shop) -> R) -> (R, Shop) {
        let handle = self.handle(id).await;
        let mut shop = handle.lock().await;
        let result = mutate(&mut shop);
        (result, shop.clone())
    }

    /// Returns `true` if a live shop exists for `id`.
    #[must_use]
    pub fn contains(&self, id: ShopId) -> bool {
        self.shops.contains_key(&id)
    }

    /// Approximate number of live shops.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.shops.entry_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply pending evictions. Tests use this to observe the bounds.
    pub async fn run_pending_tasks(&self) {
        self.shops.run_pending_tasks().await;
    }
}
