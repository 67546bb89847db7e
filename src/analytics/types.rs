//! Response bodies for the statistics endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct EntityCounts {
    pub hospitals: usize,
    pub doctors: usize,
    pub patients: usize,
    pub diagnoses: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Summary {
    pub total_entities: usize,
    pub entity_counts: EntityCounts,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DoctorPatientStats {
    pub total_relationships: usize,
    pub doctors_with_patients: usize,
    pub total_doctors: usize,
    pub avg_patients_per_doctor: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PatientDiagnosisStats {
    pub total_diagnoses: usize,
    /// Count of *distinct* patient IDs across all diagnosis records.
    pub patients_with_diagnoses: usize,
    pub total_patients: usize,
    pub avg_diagnoses_per_patient: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SexDistribution {
    pub total: usize,
    pub male: usize,
    pub female: usize,
    pub male_percentage: f64,
    pub female_percentage: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HospitalStats {
    pub id: u64,
    pub name: String,
    pub beds_number: String,
    pub doctors_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Relationships {
    pub doctor_patient: DoctorPatientStats,
    pub patient_diagnosis: PatientDiagnosisStats,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PatientStatistics {
    pub sex_distribution: SexDistribution,
}

/// Full report served by `GET /analytics`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub summary: Summary,
    pub relationships: Relationships,
    pub patient_statistics: PatientStatistics,
    pub hospital_statistics: Vec<HospitalStats>,
}

/// Flat key-metric summary served by `GET /stats`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_entities: usize,
    pub hospitals: usize,
    pub doctors: usize,
    pub patients: usize,
    pub diagnoses: usize,
    pub doctor_patient_relationships: usize,
    pub avg_patients_per_doctor: f64,
    pub avg_diagnoses_per_patient: f64,
}
