//! Medication catalogue.

use crate::filters::QueryParams;
use crate::{Medication, MedicationFilter, NewMedication, OrdoError, OrdoResult, Store};
use std::sync::Arc;

/// Service for the medication catalogue.
#[derive(Clone)]
pub struct MedicationService {
    store: Arc<dyn Store>,
}

impl MedicationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Lists medications matching the `code`/`label`/`status` parameters, ordered by code.
    pub fn list(&self, params: &QueryParams) -> OrdoResult<Vec<Medication>> {
        let filter = MedicationFilter::from_params(params)?;
        self.store.list_medications(&filter)
    }

    /// # Errors
    ///
    /// Returns `OrdoError::Validation` keyed by `code` when the code is already taken.
    pub fn create(&self, new: &NewMedication) -> OrdoResult<Medication> {
        self.store.insert_medication(new)
    }

    pub fn find_by_code(&self, code: &str) -> OrdoResult<Option<Medication>> {
        self.store.find_medication_by_code(code)
    }

    /// Deletes the medication together with all prescriptions referencing it.
    pub fn delete(&self, id: i64) -> OrdoResult<()> {
        if self.store.delete_medication(id)? {
            Ok(())
        } else {
            Err(OrdoError::NotFound {
                entity: "medication",
                id,
            })
        }
    }
}
