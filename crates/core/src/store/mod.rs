//! Data store abstraction.
//!
//! The services only talk to the [`Store`] trait. Implementations must:
//! - key every record by an integer identity they allocate
//! - return list results in the canonical order of each resource
//!   (patients by last name, first name, id; medications by code;
//!   prescriptions by start date descending, then id)
//! - enforce uniqueness of medication codes
//! - cascade deletion of a patient or medication to its prescriptions
//! - make each single-record write atomic
//!
//! [`sqlite::SqliteStore`] is the implementation used by the binaries and the tests.

pub mod sqlite;

use crate::{
    Medication, MedicationFilter, NewMedication, NewPatient, NewPrescription, OrdoResult, Patient,
    PatientFilter, Prescription, PrescriptionFilter,
};

pub trait Store: Send + Sync {
    fn insert_patient(&self, new: &NewPatient) -> OrdoResult<Patient>;
    fn patient_exists(&self, id: i64) -> OrdoResult<bool>;
    fn list_patients(&self, filter: &PatientFilter) -> OrdoResult<Vec<Patient>>;
    /// Deletes a patient and its prescriptions. Returns `false` if no such patient exists.
    fn delete_patient(&self, id: i64) -> OrdoResult<bool>;

    /// Fails with a validation error keyed by `code` when the code is taken.
    fn insert_medication(&self, new: &NewMedication) -> OrdoResult<Medication>;
    fn medication_exists(&self, id: i64) -> OrdoResult<bool>;
    fn find_medication_by_code(&self, code: &str) -> OrdoResult<Option<Medication>>;
    fn list_medications(&self, filter: &MedicationFilter) -> OrdoResult<Vec<Medication>>;
    /// Deletes a medication and its prescriptions. Returns `false` if no such medication exists.
    fn delete_medication(&self, id: i64) -> OrdoResult<bool>;

    fn insert_prescription(&self, new: &NewPrescription) -> OrdoResult<Prescription>;
    fn get_prescription(&self, id: i64) -> OrdoResult<Option<Prescription>>;
    /// Overwrites every field. Returns `None` if no such prescription exists.
    fn update_prescription(
        &self,
        id: i64,
        values: &NewPrescription,
    ) -> OrdoResult<Option<Prescription>>;
    fn delete_prescription(&self, id: i64) -> OrdoResult<bool>;
    fn list_prescriptions(&self, filter: &PrescriptionFilter) -> OrdoResult<Vec<Prescription>>;
}
