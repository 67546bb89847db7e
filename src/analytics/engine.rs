//! Statistics computations.
//!
//! Every function scans the record store fresh and folds over the fetched
//! records. Averages and percentages are rounded to 2 decimal places and
//! guarded against division by zero.

use crate::analytics::types::{
    AnalyticsReport, DoctorPatientStats, EntityCounts, HospitalStats, PatientDiagnosisStats,
    PatientStatistics, Relationships, SexDistribution, StatsSummary, Summary,
};
use crate::error::Result;
use crate::store::keys::EntityType;
use crate::store::records::RecordStore;
use std::collections::HashSet;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub async fn count_entities(store: &RecordStore, ty: EntityType) -> Result<usize> {
    Ok(store.list_all(ty).await?.len())
}

/// Sums relation-set sizes across all doctor indices below the counter.
pub async fn doctor_patient_stats(store: &RecordStore) -> Result<DoctorPatientStats> {
    let total_doctors = count_entities(store, EntityType::Doctor).await?;

    let mut total_relationships = 0;
    let mut doctors_with_patients = 0;
    if let Some(counter) = store.auto_id(EntityType::Doctor).await? {
        for index in 0..counter {
            let members = store.relation_members(&index.to_string()).await?;
            if !members.is_empty() {
                doctors_with_patients += 1;
                total_relationships += members.len();
            }
        }
    }

    let avg_patients_per_doctor = if total_doctors == 0 {
        0.0
    } else {
        round2(total_relationships as f64 / total_doctors as f64)
    };

    Ok(DoctorPatientStats {
        total_relationships,
        doctors_with_patients,
        total_doctors,
        avg_patients_per_doctor,
    })
}

/// Counts diagnoses and the distinct patients they reference.
pub async fn patient_diagnosis_stats(store: &RecordStore) -> Result<PatientDiagnosisStats> {
    let total_patients = count_entities(store, EntityType::Patient).await?;
    let diagnoses = store.list_all(EntityType::Diagnosis).await?;
    let total_diagnoses = diagnoses.len();

    let mut referenced: HashSet<String> = HashSet::new();
    for (_, record) in &diagnoses {
        if let Some(patient_id) = record.get("patient_ID") {
            referenced.insert(patient_id.clone());
        }
    }

    let avg_diagnoses_per_patient = if total_patients == 0 {
        0.0
    } else {
        round2(total_diagnoses as f64 / total_patients as f64)
    };

    Ok(PatientDiagnosisStats {
        total_diagnoses,
        patients_with_diagnoses: referenced.len(),
        total_patients,
        avg_diagnoses_per_patient,
    })
}

/// Counts patients whose sex field is exactly "M" or "F". Records with any
/// other value count toward the total but toward neither sex.
pub async fn patient_sex_distribution(store: &RecordStore) -> Result<SexDistribution> {
    let patients = store.list_all(EntityType::Patient).await?;
    let total = patients.len();

    let male = patients
        .iter()
        .filter(|(_, record)| record.get("sex").map(String::as_str) == Some("M"))
        .count();
    let female = patients
        .iter()
        .filter(|(_, record)| record.get("sex").map(String::as_str) == Some("F"))
        .count();

    let (male_percentage, female_percentage) = if total == 0 {
        (0.0, 0.0)
    } else {
        (
            round2(male as f64 * 100.0 / total as f64),
            round2(female as f64 * 100.0 / total as f64),
        )
    };

    Ok(SexDistribution {
        total,
        male,
        female,
        male_percentage,
        female_percentage,
    })
}

/// Per-hospital doctor headcount, matched by the textual form of the
/// hospital's identifier against each doctor's `hospital_ID` field.
pub async fn hospital_statistics(store: &RecordStore) -> Result<Vec<HospitalStats>> {
    let hospitals = store.list_all(EntityType::Hospital).await?;
    let doctors = store.list_all(EntityType::Doctor).await?;

    let mut stats = Vec::with_capacity(hospitals.len());
    for (id, hospital) in hospitals {
        let id_text = id.to_string();
        let doctors_count = doctors
            .iter()
            .filter(|(_, doctor)| doctor.get("hospital_ID") == Some(&id_text))
            .count();

        stats.push(HospitalStats {
            id,
            name: hospital.get("name").cloned().unwrap_or_default(),
            beds_number: hospital.get("beds_number").cloned().unwrap_or_default(),
            doctors_count,
        });
    }

    Ok(stats)
}

/// Composes the full nested report for `GET /analytics`.
pub async fn analytics_report(store: &RecordStore) -> Result<AnalyticsReport> {
    let hospitals = count_entities(store, EntityType::Hospital).await?;
    let doctors = count_entities(store, EntityType::Doctor).await?;
    let patients = count_entities(store, EntityType::Patient).await?;
    let diagnoses = count_entities(store, EntityType::Diagnosis).await?;

    Ok(AnalyticsReport {
        summary: Summary {
            total_entities: hospitals + doctors + patients + diagnoses,
            entity_counts: EntityCounts {
                hospitals,
                doctors,
                patients,
                diagnoses,
            },
        },
        relationships: Relationships {
            doctor_patient: doctor_patient_stats(store).await?,
            patient_diagnosis: patient_diagnosis_stats(store).await?,
        },
        patient_statistics: PatientStatistics {
            sex_distribution: patient_sex_distribution(store).await?,
        },
        hospital_statistics: hospital_statistics(store).await?,
    })
}

/// Composes the flat key-metric summary for `GET /stats`.
pub async fn stats_summary(store: &RecordStore) -> Result<StatsSummary> {
    let hospitals = count_entities(store, EntityType::Hospital).await?;
    let doctors = count_entities(store, EntityType::Doctor).await?;
    let patients = count_entities(store, EntityType::Patient).await?;
    let diagnoses = count_entities(store, EntityType::Diagnosis).await?;

    let doctor_patient = doctor_patient_stats(store).await?;
    let patient_diagnosis = patient_diagnosis_stats(store).await?;

    Ok(StatsSummary {
        total_entities: hospitals + doctors + patients + diagnoses,
        hospitals,
        doctors,
        patients,
        diagnoses,
        doctor_patient_relationships: doctor_patient.total_relationships,
        avg_patients_per_doctor: doctor_patient.avg_patients_per_doctor,
        avg_diagnoses_per_patient: patient_diagnosis.avg_diagnoses_per_patient,
    })
}
