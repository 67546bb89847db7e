//! Analytics Module Tests
//!
//! Validates the aggregate statistics against seeded in-memory data.
//!
//! ## Test Scopes
//! - **Zero guards**: empty store yields all-zero reports, no division by zero.
//! - **Folding rules**: distinct-patient counting, strict M/F matching,
//!   textual hospital-ID matching, 2-decimal rounding.

#[cfg(test)]
mod tests {
    use crate::analytics::engine;
    use crate::store::keys::EntityType;
    use crate::store::memory::MemoryStore;
    use crate::store::records::RecordStore;
    use std::sync::Arc;

    async fn initialized_store() -> RecordStore {
        let store = RecordStore::new(Arc::new(MemoryStore::new()));
        store.init_db().await.unwrap();
        store
    }

    /// Runs the same sequence a successful creation handler runs.
    async fn seed(store: &RecordStore, ty: EntityType, fields: &[(&str, &str)]) -> u64 {
        let id = store.auto_id(ty).await.unwrap().unwrap();
        store.create(ty, id, fields).await.unwrap();
        store.increment_auto_id(ty).await.unwrap();
        id
    }

    async fn seed_patient(store: &RecordStore, surname: &str, sex: &str) -> u64 {
        seed(
            store,
            EntityType::Patient,
            &[("surname", surname), ("born_date", "1990-01-01"), ("sex", sex), ("mpn", "123")],
        )
        .await
    }

    async fn seed_doctor(store: &RecordStore, surname: &str, hospital_id: &str) -> u64 {
        seed(
            store,
            EntityType::Doctor,
            &[("surname", surname), ("profession", "Surgeon"), ("hospital_ID", hospital_id)],
        )
        .await
    }

    // ============================================================
    // EMPTY STORE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_stats_summary_on_empty_store() {
        let store = initialized_store().await;

        let summary = engine::stats_summary(&store).await.unwrap();
        assert_eq!(summary.total_entities, 0);
        assert_eq!(summary.hospitals, 0);
        assert_eq!(summary.doctors, 0);
        assert_eq!(summary.patients, 0);
        assert_eq!(summary.diagnoses, 0);
        assert_eq!(summary.doctor_patient_relationships, 0);
        assert_eq!(summary.avg_patients_per_doctor, 0.0);
        assert_eq!(summary.avg_diagnoses_per_patient, 0.0);
    }

    #[tokio::test]
    async fn test_analytics_report_on_empty_store() {
        let store = initialized_store().await;

        let report = engine::analytics_report(&store).await.unwrap();
        assert_eq!(report.summary.total_entities, 0);
        assert_eq!(report.summary.entity_counts.hospitals, 0);
        assert_eq!(report.relationships.doctor_patient.total_doctors, 0);
        assert_eq!(report.relationships.doctor_patient.avg_patients_per_doctor, 0.0);
        assert_eq!(report.patient_statistics.sex_distribution.total, 0);
        assert_eq!(report.patient_statistics.sex_distribution.male_percentage, 0.0);
        assert_eq!(report.patient_statistics.sex_distribution.female_percentage, 0.0);
        assert!(report.hospital_statistics.is_empty());
    }

    // ============================================================
    // DOCTOR-PATIENT STATS TESTS
    // ============================================================

    #[tokio::test]
    async fn test_doctor_patient_stats_sums_and_averages() {
        let store = initialized_store().await;

        let with_patients = seed_doctor(&store, "House", "").await;
        seed_doctor(&store, "Wilson", "").await;

        let doctor_id = with_patients.to_string();
        store.add_relation(&doctor_id, "4").await.unwrap();
        store.add_relation(&doctor_id, "5").await.unwrap();

        let stats = engine::doctor_patient_stats(&store).await.unwrap();
        assert_eq!(stats.total_relationships, 2);
        assert_eq!(stats.doctors_with_patients, 1);
        assert_eq!(stats.total_doctors, 2);
        assert_eq!(stats.avg_patients_per_doctor, 1.0);
    }

    #[tokio::test]
    async fn test_doctor_patient_average_rounds_to_two_decimals() {
        let store = initialized_store().await;

        for surname in ["A", "B", "C"] {
            seed_doctor(&store, surname, "").await;
        }
        store.add_relation("1", "7").await.unwrap();
        store.add_relation("2", "8").await.unwrap();

        let stats = engine::doctor_patient_stats(&store).await.unwrap();
        // 2 relationships over 3 doctors
        assert_eq!(stats.avg_patients_per_doctor, 0.67);
    }

    // ============================================================
    // PATIENT-DIAGNOSIS STATS TESTS
    // ============================================================

    #[tokio::test]
    async fn test_patient_diagnosis_stats_counts_distinct_patients() {
        let store = initialized_store().await;

        seed_patient(&store, "Smith", "M").await;
        seed_patient(&store, "Jones", "F").await;

        // Three diagnoses across two distinct patients.
        for patient_id in ["1", "1", "2"] {
            seed(
                &store,
                EntityType::Diagnosis,
                &[("patient_ID", patient_id), ("type", "flu"), ("information", "")],
            )
            .await;
        }

        let stats = engine::patient_diagnosis_stats(&store).await.unwrap();
        assert_eq!(stats.total_diagnoses, 3);
        assert_eq!(stats.patients_with_diagnoses, 2);
        assert_eq!(stats.total_patients, 2);
        assert_eq!(stats.avg_diagnoses_per_patient, 1.5);
    }

    // ============================================================
    // SEX DISTRIBUTION TESTS
    // ============================================================

    #[tokio::test]
    async fn test_sex_distribution_excludes_unknown_values() {
        let store = initialized_store().await;

        seed_patient(&store, "Smith", "M").await;
        seed_patient(&store, "Jones", "M").await;
        seed_patient(&store, "Brown", "F").await;
        // Seeded below handler validation; the engine must still exclude it
        // from both counts while keeping it in the total.
        seed_patient(&store, "Doe", "X").await;

        let distribution = engine::patient_sex_distribution(&store).await.unwrap();
        assert_eq!(distribution.total, 4);
        assert_eq!(distribution.male, 2);
        assert_eq!(distribution.female, 1);
        assert!(distribution.male + distribution.female <= distribution.total);
        assert_eq!(distribution.male_percentage, 50.0);
        assert_eq!(distribution.female_percentage, 25.0);
    }

    // ============================================================
    // HOSPITAL STATISTICS TESTS
    // ============================================================

    #[tokio::test]
    async fn test_hospital_statistics_counts_doctors_by_textual_id() {
        let store = initialized_store().await;

        let first = seed(
            &store,
            EntityType::Hospital,
            &[("name", "St. Mary"), ("address", "1 Main St"), ("phone", "555"), ("beds_number", "100")],
        )
        .await;
        let second = seed(
            &store,
            EntityType::Hospital,
            &[("name", "General"), ("address", "2 Oak Ave"), ("phone", ""), ("beds_number", "50")],
        )
        .await;

        seed_doctor(&store, "House", &first.to_string()).await;
        seed_doctor(&store, "Wilson", &first.to_string()).await;
        // Unaffiliated doctor; empty hospital_ID matches no hospital.
        seed_doctor(&store, "Cameron", "").await;

        let stats = engine::hospital_statistics(&store).await.unwrap();
        assert_eq!(stats.len(), 2);

        assert_eq!(stats[0].id, first);
        assert_eq!(stats[0].name, "St. Mary");
        assert_eq!(stats[0].beds_number, "100");
        assert_eq!(stats[0].doctors_count, 2);

        assert_eq!(stats[1].id, second);
        assert_eq!(stats[1].doctors_count, 0);
    }

    // ============================================================
    // COMPOSED REPORT TESTS
    // ============================================================

    #[tokio::test]
    async fn test_summary_totals_add_up() {
        let store = initialized_store().await;

        seed(
            &store,
            EntityType::Hospital,
            &[("name", "St. Mary"), ("address", "1 Main St"), ("phone", ""), ("beds_number", "10")],
        )
        .await;
        seed_doctor(&store, "House", "1").await;
        seed_patient(&store, "Smith", "M").await;

        let report = engine::analytics_report(&store).await.unwrap();
        assert_eq!(report.summary.total_entities, 3);
        assert_eq!(report.summary.entity_counts.hospitals, 1);
        assert_eq!(report.summary.entity_counts.doctors, 1);
        assert_eq!(report.summary.entity_counts.patients, 1);
        assert_eq!(report.summary.entity_counts.diagnoses, 0);

        let summary = engine::stats_summary(&store).await.unwrap();
        assert_eq!(summary.total_entities, 3);
    }

    #[tokio::test]
    async fn test_report_json_key_structure() {
        let store = initialized_store().await;

        let report = engine::analytics_report(&store).await.unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["summary"]["entity_counts"]["hospitals"].is_number());
        assert!(value["relationships"]["doctor_patient"]["avg_patients_per_doctor"].is_number());
        assert!(value["relationships"]["patient_diagnosis"]["patients_with_diagnoses"].is_number());
        assert!(value["patient_statistics"]["sex_distribution"]["male_percentage"].is_number());
        assert_eq!(value["hospital_statistics"], serde_json::json!([]));

        let summary = engine::stats_summary(&store).await.unwrap();
        let value = serde_json::to_value(&summary).unwrap();
        for key in [
            "total_entities",
            "hospitals",
            "doctors",
            "patients",
            "diagnoses",
            "doctor_patient_relationships",
            "avg_patients_per_doctor",
            "avg_diagnoses_per_patient",
        ] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
    }
}
