//! Minimal server-rendered pages.
//!
//! The read pages are plain HTML tables built by hand; styling, templates,
//! and static assets are out of scope.

use crate::store::records::Record;
use std::collections::{BTreeMap, HashSet};

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{}</title></head>\n<body>\n<h1>{}</h1>\n{}\n</body>\n</html>\n",
        escape(title),
        escape(title),
        body
    )
}

pub fn index_page() -> String {
    let body = "<ul>\n\
        <li><a href=\"/hospital\">Hospitals</a></li>\n\
        <li><a href=\"/doctor\">Doctors</a></li>\n\
        <li><a href=\"/patient\">Patients</a></li>\n\
        <li><a href=\"/diagnosis\">Diagnoses</a></li>\n\
        <li><a href=\"/doctor-patient\">Doctor-patient relations</a></li>\n\
        <li><a href=\"/analytics\">Analytics</a></li>\n\
        <li><a href=\"/stats\">Stats</a></li>\n\
        </ul>";
    page("Hospital Network Registry", body)
}

/// One table row per record, columns in the entity's field order.
pub fn entity_page(title: &str, columns: &[&str], items: &[(u64, Record)]) -> String {
    let mut body = String::from("<table border=\"1\">\n<tr><th>ID</th>");
    for column in columns {
        body.push_str(&format!("<th>{}</th>", escape(column)));
    }
    body.push_str("</tr>\n");

    for (id, record) in items {
        body.push_str(&format!("<tr><td>{}</td>", id));
        for column in columns {
            let value = record.get(*column).map(String::as_str).unwrap_or("");
            body.push_str(&format!("<td>{}</td>", escape(value)));
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</table>");

    page(title, &body)
}

/// One row per doctor with a non-empty relation set.
pub fn relation_page(items: &BTreeMap<u64, HashSet<String>>) -> String {
    let mut body = String::from("<table border=\"1\">\n<tr><th>Doctor ID</th><th>Patient IDs</th></tr>\n");

    for (doctor_id, members) in items {
        let mut patient_ids: Vec<&str> = members.iter().map(String::as_str).collect();
        patient_ids.sort_unstable();
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            doctor_id,
            escape(&patient_ids.join(", "))
        ));
    }
    body.push_str("</table>");

    page("Doctor-Patient Relations", &body)
}
