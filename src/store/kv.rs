//! Key-value backend abstraction.
//!
//! `KeyValue` mirrors the handful of Redis primitives the service composes:
//! string get/set/increment, hash set-field/get-all, and set add/members.
//! Each call is a single atomic round trip; there are no multi-key
//! transactions. Components receive the backend as `Arc<dyn KeyValue>`
//! through their constructors, so the test harness can substitute
//! [`MemoryStore`](super::memory::MemoryStore) for a running Redis.

use crate::error::{Result, StoreError};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::collections::{HashMap, HashSet};

/// The atomic primitives the record store is built on.
#[async_trait]
pub trait KeyValue: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Atomically increments the integer at `key` and returns the new value.
    /// A missing key counts as 0.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Sets one hash field. Returns 1 if the field was newly created, 0 if it
    /// already existed.
    async fn hset(&self, key: &str, field: &str, value: &str) -> Result<u64>;

    /// Returns the full hash at `key`; empty when the key does not exist.
    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>>;

    /// Adds one member to a set. Returns 1 if the member was new, 0 otherwise.
    async fn sadd(&self, key: &str, member: &str) -> Result<u64>;

    async fn smembers(&self, key: &str) -> Result<HashSet<String>>;
}

/// Production backend over a multiplexed async Redis connection.
pub struct RedisStore {
    connection: MultiplexedConnection,
}

impl RedisStore {
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(StoreError::from)?;
        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(StoreError::from)?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl KeyValue for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        conn.set::<_, _, ()>(key, value).await?;
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.connection.clone();
        let value: i64 = conn.incr(key, 1).await?;
        Ok(value)
    }

    async fn hset(&self, key: &str, field: &str, value: &str) -> Result<u64> {
        let mut conn = self.connection.clone();
        let created: u64 = conn.hset(key, field, value).await?;
        Ok(created)
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>> {
        let mut conn = self.connection.clone();
        let record: HashMap<String, String> = conn.hgetall(key).await?;
        Ok(record)
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<u64> {
        let mut conn = self.connection.clone();
        let added: u64 = conn.sadd(key, member).await?;
        Ok(added)
    }

    async fn smembers(&self, key: &str) -> Result<HashSet<String>> {
        let mut conn = self.connection.clone();
        let members: HashSet<String> = conn.smembers(key).await?;
        Ok(members)
    }
}
