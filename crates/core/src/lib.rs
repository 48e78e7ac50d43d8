//! # Ordo Core
//!
//! Core business logic for the Ordo prescription service.
//!
//! This crate contains pure data operations:
//! - Patient, Medication and Prescription domain types
//! - The date-range validation rule for prescriptions
//! - The query filter builder used by every list operation
//! - The relational store behind the [`Store`] trait (SQLite)
//! - Resource services applying validation before persistence
//! - Demo data seeding
//!
//! **No API concerns**: HTTP routing, JSON wire shapes and OpenAPI documentation belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod error;
pub mod filters;
pub mod medication;
pub mod patient;
pub mod prescription;
pub mod repositories;
pub mod seed;
pub mod store;
pub mod text;
pub mod validation;

pub use config::CoreConfig;
pub use constants::DEFAULT_DATABASE_PATH;
pub use error::{FieldErrors, OrdoError, OrdoResult};
pub use filters::{MedicationFilter, PatientFilter, PrescriptionFilter};
pub use medication::{Medication, MedicationStatus, NewMedication};
pub use patient::{NewPatient, Patient};
pub use prescription::{NewPrescription, Prescription, PrescriptionInput, PrescriptionStatus, Supplied};
pub use repositories::{MedicationService, PatientService, PrescriptionService};
pub use store::{sqlite::SqliteStore, Store};
pub use text::{NonEmptyText, TextError};
