//! Typed record layer over the key-value backend.
//!
//! Each record is one hash at `"<prefix>:<id>"`; identifiers come from a
//! per-type counter that starts at 1 and is incremented after each creation.
//! The counter value at creation time is the assigned ID, so IDs start at 1
//! and index 0 is never written; listings scan the dense range
//! `[0, counter)` and skip empty hashes. Field writes and the counter
//! increment are separate operations with no transaction around them; a
//! failure between the two leaves an advanced counter with a missing or
//! partial record, which listings tolerate by filtering empty reads.

use crate::error::Result;
use crate::store::keys::{doctor_patient_key, EntityType, DB_INITIATED};
use crate::store::kv::KeyValue;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

/// One stored record: field name → string value.
pub type Record = HashMap<String, String>;

pub struct RecordStore {
    kv: Arc<dyn KeyValue>,
}

impl RecordStore {
    pub fn new(kv: Arc<dyn KeyValue>) -> Self {
        Self { kv }
    }

    /// Current counter value for a type, or `None` if never initialized.
    pub async fn auto_id(&self, ty: EntityType) -> Result<Option<u64>> {
        let value = self.kv.get(&ty.auto_id_key()).await?;
        Ok(value.and_then(|raw| raw.parse().ok()))
    }

    /// Atomically bumps the counter. Called exactly once per successful
    /// creation, after the field writes.
    pub async fn increment_auto_id(&self, ty: EntityType) -> Result<i64> {
        self.kv.incr(&ty.auto_id_key()).await
    }

    /// All records of a type in ascending identifier order.
    ///
    /// Scans identifiers `[0, counter)` and keeps only non-empty hashes, so
    /// the permanent hole at index 0 and any hole left by a failed write are
    /// silently skipped. Empty when the counter is absent or zero.
    pub async fn list_all(&self, ty: EntityType) -> Result<Vec<(u64, Record)>> {
        let Some(counter) = self.auto_id(ty).await? else {
            return Ok(Vec::new());
        };

        let mut items = Vec::new();
        for index in 0..counter {
            let record = self.kv.hgetall(&ty.record_key(&index.to_string())).await?;
            if !record.is_empty() {
                items.push((index, record));
            }
        }

        Ok(items)
    }

    /// Fetches one record. An empty map means "not found".
    pub async fn get(&self, ty: EntityType, id: &str) -> Result<Record> {
        self.kv.hgetall(&ty.record_key(id)).await
    }

    /// A record exists iff its hash has at least one field set.
    pub async fn exists(&self, ty: EntityType, id: &str) -> Result<bool> {
        Ok(!self.get(ty, id).await?.is_empty())
    }

    /// Writes each field individually and returns the summed new-field count.
    ///
    /// The backend offers no multi-field atomicity, so callers must compare
    /// the returned count against `ty.field_count()` and treat a mismatch as
    /// a write-integrity failure.
    pub async fn create(&self, ty: EntityType, id: u64, fields: &[(&str, &str)]) -> Result<u64> {
        let key = ty.record_key(&id.to_string());

        let mut total_set = 0;
        for (field, value) in fields {
            total_set += self.kv.hset(&key, field, value).await?;
        }

        Ok(total_set)
    }

    /// Adds a patient to a doctor's relation set. Idempotent.
    pub async fn add_relation(&self, doctor_id: &str, patient_id: &str) -> Result<u64> {
        self.kv.sadd(&doctor_patient_key(doctor_id), patient_id).await
    }

    pub async fn relation_members(&self, doctor_id: &str) -> Result<HashSet<String>> {
        self.kv.smembers(&doctor_patient_key(doctor_id)).await
    }

    /// Relation sets for every doctor index below the counter, keyed by
    /// doctor ID, skipping doctors with no patients.
    pub async fn relation_map(&self) -> Result<BTreeMap<u64, HashSet<String>>> {
        let Some(counter) = self.auto_id(EntityType::Doctor).await? else {
            return Ok(BTreeMap::new());
        };

        let mut map = BTreeMap::new();
        for index in 0..counter {
            let members = self.relation_members(&index.to_string()).await?;
            if !members.is_empty() {
                map.insert(index, members);
            }
        }

        Ok(map)
    }

    pub async fn set_initial_auto_id(&self, ty: EntityType, value: u64) -> Result<()> {
        self.kv.set(&ty.auto_id_key(), &value.to_string()).await
    }

    pub async fn is_initialized(&self) -> Result<bool> {
        Ok(self.kv.get(DB_INITIATED).await?.is_some())
    }

    pub async fn mark_initialized(&self) -> Result<()> {
        self.kv.set(DB_INITIATED, "1").await
    }

    /// One-time counter setup, guarded by the `db_initiated` flag so that
    /// restarts leave existing counters untouched.
    pub async fn init_db(&self) -> Result<()> {
        if self.is_initialized().await? {
            return Ok(());
        }

        for ty in EntityType::ALL {
            self.set_initial_auto_id(ty, 1).await?;
        }

        self.mark_initialized().await
    }
}
