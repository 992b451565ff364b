use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{ReservationStore, StoreError};
use crate::model::ProductId;

/// Process-local store backed by `Mutex<HashMap>`.
///
/// The compare-and-set runs under the map lock, so it has the same atomicity
/// as the Redis script.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    counters: Mutex<HashMap<ProductId, u32>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn counters(&self) -> Result<MutexGuard<'_, HashMap<ProductId, u32>>, StoreError> {
        self.counters
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("counter map poisoned: {e}")))
    }
}

#[async_trait]
impl ReservationStore for InMemoryStore {
    async fn get_reserved(&self, item: ProductId) -> Result<u32, StoreError> {
        Ok(self.counters()?.get(&item).copied().unwrap_or(0))
    }

    async fn set_reserved(&self, item: ProductId, count: u32) -> Result<(), StoreError> {
        self.counters()?.insert(item, count);
        Ok(())
    }

    async fn compare_and_set_reserved(
        &self,
        item: ProductId,
        expected: u32,
        new: u32,
    ) -> Result<bool, StoreError> {
        let mut counters = self.counters()?;
        let current = counters.entry(item).or_insert(0);
        if *current != expected {
            return Ok(false);
        }
        *current = new;
        Ok(true)
    }
}
