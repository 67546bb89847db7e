//! In-memory key-value backend.
//!
//! Implements the same primitives as the Redis backend over process-local
//! concurrent maps. The test harness constructs the service against this
//! store instead of a running Redis.

use crate::error::Result;
use crate::store::kv::KeyValue;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};

#[derive(Default)]
pub struct MemoryStore {
    strings: DashMap<String, String>,
    hashes: DashMap<String, HashMap<String, String>>,
    sets: DashMap<String, HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValue for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.strings.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.strings.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut entry = self
            .strings
            .entry(key.to_string())
            .or_insert_with(|| "0".to_string());
        let next = entry.value().parse::<i64>().unwrap_or(0) + 1;
        *entry.value_mut() = next.to_string();
        Ok(next)
    }

    async fn hset(&self, key: &str, field: &str, value: &str) -> Result<u64> {
        let mut hash = self.hashes.entry(key.to_string()).or_default();
        let created = if hash.contains_key(field) { 0 } else { 1 };
        hash.insert(field.to_string(), value.to_string());
        Ok(created)
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>> {
        Ok(self
            .hashes
            .get(key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<u64> {
        let mut set = self.sets.entry(key.to_string()).or_default();
        Ok(if set.insert(member.to_string()) { 1 } else { 0 })
    }

    async fn smembers(&self, key: &str) -> Result<HashSet<String>> {
        Ok(self
            .sets
            .get(key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}
