//! Storage of per-product reservation counters.
//!
//! A store owns one counter per product id: the cumulative number of units
//! reserved so far. Absent counters read as zero. Every mutation that depends
//! on the current value must go through
//! [`compare_and_set_reserved`](ReservationStore::compare_and_set_reserved).

use async_trait::async_trait;

use crate::model::ProductId;

mod error;
pub use error::StoreError;

mod memory;
pub use memory::InMemoryStore;

mod redis_store;
pub use redis_store::RedisStore;

#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Current reserved count, 0 if no counter exists yet.
    async fn get_reserved(&self, item: ProductId) -> Result<u32, StoreError>;

    /// Overwrite the counter unconditionally.
    async fn set_reserved(&self, item: ProductId, count: u32) -> Result<(), StoreError>;

    /// Atomically replace the counter with `new` if it still equals
    /// `expected` (an absent counter equals 0). Returns whether it applied.
    async fn compare_and_set_reserved(
        &self,
        item: ProductId,
        expected: u32,
        new: u32,
    ) -> Result<bool, StoreError>;
}
