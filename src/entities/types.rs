//! Form bodies accepted by the creation endpoints.
//!
//! All fields are strings and default to empty when absent, so requiredness
//! is checked in the handlers rather than at deserialization time.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct HospitalForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub beds_number: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct DoctorForm {
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub profession: String,
    #[serde(default, rename = "hospital_ID")]
    pub hospital_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PatientForm {
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub born_date: String,
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub mpn: String,
}

#[derive(Debug, Deserialize)]
pub struct DiagnosisForm {
    #[serde(default, rename = "patient_ID")]
    pub patient_id: String,
    #[serde(default, rename = "type")]
    pub diagnosis_type: String,
    #[serde(default)]
    pub information: String,
}

#[derive(Debug, Deserialize)]
pub struct RelationForm {
    #[serde(default, rename = "doctor_ID")]
    pub doctor_id: String,
    #[serde(default, rename = "patient_ID")]
    pub patient_id: String,
}
