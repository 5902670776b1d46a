//! Non-repeating random selection over content pools.

use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use crate::content::PoolId;
use crate::session::SessionStore;

/// Picks pseudo-random pool indices without repeating an item already shown
/// to the user, until the pool is exhausted, then starts over.
pub struct ContentRotator {
    store: Arc<SessionStore>,
}

impl ContentRotator {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Pick an unshown index from a pool of `pool_len` items for this user.
    ///
    /// If the user has seen everything, the pool's history is cleared first
    /// (full reset). The draw is uniform with rejection sampling, which
    /// terminates because the history was just verified not to be full. The
    /// chosen index is recorded before returning.
    ///
    /// # Panics
    ///
    /// Panics if `pool_len` is zero; callers guard empty pools.
    pub fn pick(&self, user_id: &str, pool: PoolId, pool_len: usize) -> usize {
        assert!(pool_len > 0, "cannot pick from an empty pool");

        if self.store.shown_len(user_id, pool) >= pool_len {
            debug!(user = %user_id, pool = %pool, "pool exhausted, resetting history");
            self.store.reset_pool(user_id, pool);
        }

        let mut rng = rand::thread_rng();
        loop {
            let index = rng.gen_range(0..pool_len);
            if !self.store.was_shown(user_id, pool, index) {
                self.store.record_shown(user_id, pool, index);
                return index;
            }
        }
    }
}
