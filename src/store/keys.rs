//! Key layout of the backing store.
//!
//! Persisted state lives under four namespaces:
//! - `"<prefix>:autoID"`: per-type integer counter (string-encoded).
//! - `"<prefix>:<id>"`: one hash of field-to-value strings per record.
//! - `"doctor-patient:<doctor_id>"`: set of patient-ID strings per doctor.
//! - `"db_initiated"`: presence-only flag guarding one-time counter setup.

/// Presence-only flag guarding one-time counter setup.
pub const DB_INITIATED: &str = "db_initiated";

/// The four record types stored by the service.
///
/// Each variant carries its key prefix and the number of hash fields a fully
/// written record sets, so callers can detect partial writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Hospital,
    Doctor,
    Patient,
    Diagnosis,
}

impl EntityType {
    pub const ALL: [EntityType; 4] = [
        EntityType::Hospital,
        EntityType::Doctor,
        EntityType::Patient,
        EntityType::Diagnosis,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            EntityType::Hospital => "hospital",
            EntityType::Doctor => "doctor",
            EntityType::Patient => "patient",
            EntityType::Diagnosis => "diagnosis",
        }
    }

    /// Number of fields a complete record of this type sets.
    pub fn field_count(&self) -> u64 {
        match self {
            EntityType::Hospital | EntityType::Patient => 4,
            EntityType::Doctor | EntityType::Diagnosis => 3,
        }
    }

    pub fn auto_id_key(&self) -> String {
        format!("{}:autoID", self.prefix())
    }

    pub fn record_key(&self, id: &str) -> String {
        format!("{}:{}", self.prefix(), id)
    }
}

/// Key of the patient-ID set owned by one doctor.
pub fn doctor_patient_key(doctor_id: &str) -> String {
    format!("doctor-patient:{}", doctor_id)
}
