//! HTTP handlers for the record endpoints.
//!
//! Each POST runs its checks in a fixed order: required fields, referential
//! checks, counter read, field writes, counter increment, and only then the
//! write-integrity comparison; the integrity check is meaningful only once a
//! write has actually happened. Store connectivity failures short-circuit any
//! step with a uniform 400.

use crate::entities::pages;
use crate::entities::types::{DiagnosisForm, DoctorForm, HospitalForm, PatientForm, RelationForm};
use crate::store::keys::EntityType;
use crate::store::records::RecordStore;
use axum::extract::{Extension, Form};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;

const WRITE_INTEGRITY_BODY: &str = "Something went terribly wrong";

fn missing_auto_id(ty: EntityType) -> (StatusCode, String) {
    tracing::error!("auto ID counter missing for {}", ty.prefix());
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error: Auto ID not found".to_string(),
    )
}

async fn render_entity_page(
    store: &RecordStore,
    ty: EntityType,
    title: &str,
    columns: &[&str],
) -> Response {
    match store.list_all(ty).await {
        Ok(items) => Html(pages::entity_page(title, columns, &items)).into_response(),
        Err(err) => err.response().into_response(),
    }
}

/// `GET /`: index page.
pub async fn handle_index() -> Html<String> {
    Html(pages::index_page())
}

/// `GET /hospital`: hospital listing.
pub async fn handle_hospital_page(Extension(store): Extension<Arc<RecordStore>>) -> Response {
    render_entity_page(
        &store,
        EntityType::Hospital,
        "Hospitals",
        &["name", "address", "phone", "beds_number"],
    )
    .await
}

/// `GET /doctor`: doctor listing.
pub async fn handle_doctor_page(Extension(store): Extension<Arc<RecordStore>>) -> Response {
    render_entity_page(
        &store,
        EntityType::Doctor,
        "Doctors",
        &["surname", "profession", "hospital_ID"],
    )
    .await
}

/// `GET /patient`: patient listing.
pub async fn handle_patient_page(Extension(store): Extension<Arc<RecordStore>>) -> Response {
    render_entity_page(
        &store,
        EntityType::Patient,
        "Patients",
        &["surname", "born_date", "sex", "mpn"],
    )
    .await
}

/// `GET /diagnosis`: diagnosis listing.
pub async fn handle_diagnosis_page(Extension(store): Extension<Arc<RecordStore>>) -> Response {
    render_entity_page(
        &store,
        EntityType::Diagnosis,
        "Diagnoses",
        &["patient_ID", "type", "information"],
    )
    .await
}

/// `GET /doctor-patient`: relation map.
pub async fn handle_relation_page(Extension(store): Extension<Arc<RecordStore>>) -> Response {
    match store.relation_map().await {
        Ok(items) => Html(pages::relation_page(&items)).into_response(),
        Err(err) => err.response().into_response(),
    }
}

/// `POST /hospital`
pub async fn handle_create_hospital(
    Extension(store): Extension<Arc<RecordStore>>,
    Form(form): Form<HospitalForm>,
) -> (StatusCode, String) {
    if form.name.is_empty() || form.address.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "Hospital name and address required".to_string(),
        );
    }

    tracing::debug!(
        "{} {} {} {}",
        form.name,
        form.address,
        form.beds_number,
        form.phone
    );

    let id = match store.auto_id(EntityType::Hospital).await {
        Ok(Some(id)) => id,
        Ok(None) => return missing_auto_id(EntityType::Hospital),
        Err(err) => return err.response(),
    };

    let fields = [
        ("name", form.name.as_str()),
        ("address", form.address.as_str()),
        ("phone", form.phone.as_str()),
        ("beds_number", form.beds_number.as_str()),
    ];
    let total_set = match store.create(EntityType::Hospital, id, &fields).await {
        Ok(count) => count,
        Err(err) => return err.response(),
    };
    if let Err(err) = store.increment_auto_id(EntityType::Hospital).await {
        return err.response();
    }

    if total_set != EntityType::Hospital.field_count() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            WRITE_INTEGRITY_BODY.to_string(),
        );
    }

    (StatusCode::OK, format!("OK: ID {} for {}", id, form.name))
}

/// `POST /doctor`
pub async fn handle_create_doctor(
    Extension(store): Extension<Arc<RecordStore>>,
    Form(form): Form<DoctorForm>,
) -> (StatusCode, String) {
    if form.surname.is_empty() || form.profession.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "Surname and profession required".to_string(),
        );
    }

    tracing::debug!("{} {}", form.surname, form.profession);

    // The hospital reference is optional; validated only when supplied.
    if !form.hospital_id.is_empty() {
        match store.exists(EntityType::Hospital, &form.hospital_id).await {
            Ok(true) => {}
            Ok(false) => {
                return (
                    StatusCode::BAD_REQUEST,
                    "No hospital with such ID".to_string(),
                )
            }
            Err(err) => return err.response(),
        }
    }

    let id = match store.auto_id(EntityType::Doctor).await {
        Ok(Some(id)) => id,
        Ok(None) => return missing_auto_id(EntityType::Doctor),
        Err(err) => return err.response(),
    };

    let fields = [
        ("surname", form.surname.as_str()),
        ("profession", form.profession.as_str()),
        ("hospital_ID", form.hospital_id.as_str()),
    ];
    let total_set = match store.create(EntityType::Doctor, id, &fields).await {
        Ok(count) => count,
        Err(err) => return err.response(),
    };
    if let Err(err) = store.increment_auto_id(EntityType::Doctor).await {
        return err.response();
    }

    if total_set != EntityType::Doctor.field_count() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            WRITE_INTEGRITY_BODY.to_string(),
        );
    }

    (StatusCode::OK, format!("OK: ID {} for {}", id, form.surname))
}

/// `POST /patient`
pub async fn handle_create_patient(
    Extension(store): Extension<Arc<RecordStore>>,
    Form(form): Form<PatientForm>,
) -> (StatusCode, String) {
    if form.surname.is_empty()
        || form.born_date.is_empty()
        || form.sex.is_empty()
        || form.mpn.is_empty()
    {
        return (StatusCode::BAD_REQUEST, "All fields required".to_string());
    }

    if form.sex != "M" && form.sex != "F" {
        return (
            StatusCode::BAD_REQUEST,
            "Sex must be 'M' or 'F'".to_string(),
        );
    }

    tracing::debug!("{} {} {} {}", form.surname, form.born_date, form.sex, form.mpn);

    let id = match store.auto_id(EntityType::Patient).await {
        Ok(Some(id)) => id,
        Ok(None) => return missing_auto_id(EntityType::Patient),
        Err(err) => return err.response(),
    };

    let fields = [
        ("surname", form.surname.as_str()),
        ("born_date", form.born_date.as_str()),
        ("sex", form.sex.as_str()),
        ("mpn", form.mpn.as_str()),
    ];
    let total_set = match store.create(EntityType::Patient, id, &fields).await {
        Ok(count) => count,
        Err(err) => return err.response(),
    };
    if let Err(err) = store.increment_auto_id(EntityType::Patient).await {
        return err.response();
    }

    if total_set != EntityType::Patient.field_count() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            WRITE_INTEGRITY_BODY.to_string(),
        );
    }

    (StatusCode::OK, format!("OK: ID {} for {}", id, form.surname))
}

/// `POST /diagnosis`
pub async fn handle_create_diagnosis(
    Extension(store): Extension<Arc<RecordStore>>,
    Form(form): Form<DiagnosisForm>,
) -> (StatusCode, String) {
    if form.patient_id.is_empty() || form.diagnosis_type.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "Patient ID and diagnosis type required".to_string(),
        );
    }

    tracing::debug!("{} {} {}", form.patient_id, form.diagnosis_type, form.information);

    let patient = match store.get(EntityType::Patient, &form.patient_id).await {
        Ok(record) => record,
        Err(err) => return err.response(),
    };
    if patient.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "No patient with such ID".to_string(),
        );
    }

    let id = match store.auto_id(EntityType::Diagnosis).await {
        Ok(Some(id)) => id,
        Ok(None) => return missing_auto_id(EntityType::Diagnosis),
        Err(err) => return err.response(),
    };

    let fields = [
        ("patient_ID", form.patient_id.as_str()),
        ("type", form.diagnosis_type.as_str()),
        ("information", form.information.as_str()),
    ];
    let total_set = match store.create(EntityType::Diagnosis, id, &fields).await {
        Ok(count) => count,
        Err(err) => return err.response(),
    };
    if let Err(err) = store.increment_auto_id(EntityType::Diagnosis).await {
        return err.response();
    }

    if total_set != EntityType::Diagnosis.field_count() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            WRITE_INTEGRITY_BODY.to_string(),
        );
    }

    let surname = patient.get("surname").cloned().unwrap_or_default();
    (
        StatusCode::OK,
        format!("OK: ID {} for patient {}", id, surname),
    )
}

/// `POST /doctor-patient`
pub async fn handle_create_relation(
    Extension(store): Extension<Arc<RecordStore>>,
    Form(form): Form<RelationForm>,
) -> (StatusCode, String) {
    if form.doctor_id.is_empty() || form.patient_id.is_empty() {
        return (StatusCode::BAD_REQUEST, "ID required".to_string());
    }

    tracing::debug!("{} {}", form.doctor_id, form.patient_id);

    let patient_exists = match store.exists(EntityType::Patient, &form.patient_id).await {
        Ok(found) => found,
        Err(err) => return err.response(),
    };
    let doctor_exists = match store.exists(EntityType::Doctor, &form.doctor_id).await {
        Ok(found) => found,
        Err(err) => return err.response(),
    };
    if !patient_exists || !doctor_exists {
        return (
            StatusCode::BAD_REQUEST,
            "No such ID for doctor or patient".to_string(),
        );
    }

    if let Err(err) = store.add_relation(&form.doctor_id, &form.patient_id).await {
        return err.response();
    }

    (
        StatusCode::OK,
        format!(
            "OK: doctor ID: {}, patient ID: {}",
            form.doctor_id, form.patient_id
        ),
    )
}
