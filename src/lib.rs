//! Hospital Network Record Service Library
//!
//! This library crate defines the core modules that make up the record
//! service. It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of four loosely coupled subsystems:
//!
//! - **`store`**: The data-access layer. A thin typed layer over a Redis-style
//!   key-value backend implementing auto-incrementing identifiers, per-type
//!   hash records, and one patient-ID relation set per doctor.
//! - **`entities`**: The HTTP surface for the four record types (hospital,
//!   doctor, patient, diagnosis) and the doctor↔patient relation: form
//!   validation, referential checks, and plain-text/HTML responses.
//! - **`analytics`**: Read-only derived statistics computed by scanning
//!   record listings and folding over their fields.
//! - **`config`**: Environment-driven configuration for the Redis endpoint.

pub mod analytics;
pub mod config;
pub mod entities;
pub mod error;
pub mod store;
