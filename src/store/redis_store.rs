use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError, Script};
use tracing::debug;

use super::{ReservationStore, StoreError};
use crate::model::ProductId;

/// Compare-and-set on a counter key. A missing key compares as 0.
/// Returns 1 when the write applied, 0 otherwise.
const COMPARE_AND_SET: &str = r"
local current = redis.call('GET', KEYS[1])
if current == false then
    current = '0'
end
if tonumber(current) == tonumber(ARGV[1]) then
    redis.call('SET', KEYS[1], ARGV[2])
    return 1
end
return 0
";

const DEFAULT_PREFIX: &str = "item.";

fn key_for(prefix: &str, item: ProductId) -> String {
    format!("{prefix}{item}")
}

/// Redis-backed counter store. Counters live under `item.<id>`.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    key_prefix: String,
    cas: Script,
}

impl From<RedisError> for StoreError {
    fn from(err: RedisError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl RedisStore {
    /// Connect and verify the server answers `PING`.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = Client::open(url)?;
        let mut conn = ConnectionManager::new(client).await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        debug!(url, "connected to redis");
        Ok(Self::new(conn))
    }

    pub fn new(conn: ConnectionManager) -> Self {
        Self {
            conn,
            key_prefix: DEFAULT_PREFIX.to_string(),
            cas: Script::new(COMPARE_AND_SET),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    fn counter_key(&self, item: ProductId) -> String {
        key_for(&self.key_prefix, item)
    }
}

#[async_trait]
impl ReservationStore for RedisStore {
    async fn get_reserved(&self, item: ProductId) -> Result<u32, StoreError> {
        let mut conn = self.conn.clone();
        let key = self.counter_key(item);
        let raw: Option<String> = conn.get(&key).await?;

        match raw {
            None => Ok(0),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| StoreError::CorruptCounter { key, value }),
        }
    }

    async fn set_reserved(&self, item: ProductId, count: u32) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(self.counter_key(item), count).await?;
        Ok(())
    }

    async fn compare_and_set_reserved(
        &self,
        item: ProductId,
        expected: u32,
        new: u32,
    ) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let applied: i64 = self
            .cas
            .key(self.counter_key(item))
            .arg(expected)
            .arg(new)
            .invoke_async(&mut conn)
            .await?;
        Ok(applied == 1)
    }
}
