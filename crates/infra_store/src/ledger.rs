//! In-memory pool repository

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use core_kernel::{Address, PoolId};
use domain_pool::{Pool, PoolError};

use crate::error::StoreError;

#[derive(Debug, Default)]
struct Inner {
    pools: HashMap<PoolId, Arc<Mutex<Pool>>>,
    /// Insertion order, for stable listings
    order: Vec<PoolId>,
}

/// Store holding every pool
///
/// Share it as `Arc<LedgerStore>`. Reads return cloned snapshots; the only
/// way to change a pool is [`LedgerStore::mutate`].
#[derive(Debug, Default)]
pub struct LedgerStore {
    inner: RwLock<Inner>,
}

impl LedgerStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new pool
    ///
    /// # Errors
    ///
    /// Returns `DuplicatePool` if a pool with the same id is already stored.
    #[instrument(skip(self, pool), fields(pool_id = %pool.id, name = %pool.name))]
    pub async fn insert(&self, pool: Pool) -> Result<PoolId, StoreError> {
        let id = pool.id;
        let mut inner = self.inner.write().await;
        if inner.pools.contains_key(&id) {
            warn!("Pool already stored");
            return Err(StoreError::DuplicatePool(id));
        }
        inner.pools.insert(id, Arc::new(Mutex::new(pool)));
        inner.order.push(id);
        info!(pools = inner.order.len(), "Pool stored");
        Ok(id)
    }

    /// Snapshot of one pool
    pub async fn get(&self, id: PoolId) -> Result<Pool, StoreError> {
        let slot = self.slot(id).await?;
        let pool = slot.lock().await;
        Ok(pool.clone())
    }

    /// Snapshots of every pool, oldest first
    pub async fn list(&self) -> Vec<Pool> {
        let slots: Vec<Arc<Mutex<Pool>>> = {
            let inner = self.inner.read().await;
            inner
                .order
                .iter()
                .filter_map(|id| inner.pools.get(id).cloned())
                .collect()
        };

        let mut pools = Vec::with_capacity(slots.len());
        for slot in slots {
            pools.push(slot.lock().await.clone());
        }
        debug!(count = pools.len(), "Listed pools");
        pools
    }

    /// Snapshots of the pools `member` belongs to, oldest first
    pub async fn member_pools(&self, member: &Address) -> Vec<Pool> {
        self.list()
            .await
            .into_iter()
            .filter(|pool| pool.is_member(member))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Applies `op` to one pool as a single atomic step
    ///
    /// The pool stays locked for the whole call. `op` works on a copy, and
    /// the copy replaces the stored pool only if `op` returns `Ok`, so a
    /// failed operation leaves no partial change behind.
    ///
    /// # Errors
    ///
    /// - `PoolNotFound` if no pool has this id
    /// - `Pool` with whatever error `op` returned
    #[instrument(skip(self, op), fields(pool_id = %id))]
    pub async fn mutate<T, F>(&self, id: PoolId, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Pool) -> Result<T, PoolError>,
    {
        let slot = self.slot(id).await?;
        let mut stored = slot.lock().await;

        let mut working = stored.clone();
        match op(&mut working) {
            Ok(value) => {
                *stored = working;
                debug!("Mutation committed");
                Ok(value)
            }
            Err(e) => {
                warn!(error = %e, "Mutation rejected");
                Err(e.into())
            }
        }
    }

    async fn slot(&self, id: PoolId) -> Result<Arc<Mutex<Pool>>, StoreError> {
        self.inner
            .read()
            .await
            .pools
            .get(&id)
            .cloned()
            .ok_or(StoreError::PoolNotFound(id))
    }
}
