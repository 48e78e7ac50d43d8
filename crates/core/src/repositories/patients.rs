//! Patient listing, creation and removal.

use crate::filters::QueryParams;
use crate::{NewPatient, OrdoError, OrdoResult, Patient, PatientFilter, Store};
use std::sync::Arc;

/// Service for patient records.
#[derive(Clone)]
pub struct PatientService {
    store: Arc<dyn Store>,
}

impl PatientService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Lists patients matching the `nom`/`prenom`/`date_naissance` parameters (or their
    /// English aliases), ordered by last name, first name, id.
    ///
    /// # Errors
    ///
    /// Returns `OrdoError::Validation` for a malformed birth date parameter, or a store error.
    pub fn list(&self, params: &QueryParams) -> OrdoResult<Vec<Patient>> {
        let filter = PatientFilter::from_params(params)?;
        self.store.list_patients(&filter)
    }

    pub fn create(&self, new: &NewPatient) -> OrdoResult<Patient> {
        self.store.insert_patient(new)
    }

    /// Deletes the patient together with all of its prescriptions.
    ///
    /// # Errors
    ///
    /// Returns `OrdoError::NotFound` if there is no patient with this id.
    pub fn delete(&self, id: i64) -> OrdoResult<()> {
        if self.store.delete_patient(id)? {
            Ok(())
        } else {
            Err(OrdoError::NotFound {
                entity: "patient",
                id,
            })
        }
    }
}
