//! Prescription management.
//!
//! Every write goes through the same checks, in this order:
//!
//! 1. the target record exists (updates and deletes only)
//! 2. referenced patient and medication exist, and the request has the required shape
//! 3. the resulting dates are valid ([`validate_prescription_dates`])
//!
//! Field errors from step 2 are reported together; step 3 only runs once they are all clear.

use crate::filters::QueryParams;
use crate::validation::validate_prescription_dates;
use crate::{
    FieldErrors, NewPrescription, OrdoError, OrdoResult, Prescription, PrescriptionFilter,
    PrescriptionInput, Store,
};
use std::sync::Arc;

/// Service for prescriptions.
#[derive(Clone)]
pub struct PrescriptionService {
    store: Arc<dyn Store>,
}

impl PrescriptionService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Lists prescriptions matching the query parameters, newest start date first.
    ///
    /// # Errors
    ///
    /// Returns `OrdoError::Validation` keyed by parameter name when an identity or date
    /// parameter is malformed.
    pub fn list(&self, params: &QueryParams) -> OrdoResult<Vec<Prescription>> {
        let filter = PrescriptionFilter::from_params(params)?;
        self.store.list_prescriptions(&filter)
    }

    /// # Errors
    ///
    /// Returns `OrdoError::NotFound` if there is no prescription with this id.
    pub fn get(&self, id: i64) -> OrdoResult<Prescription> {
        self.store.get_prescription(id)?.ok_or(not_found(id))
    }

    /// Creates a prescription. Status defaults to `en_attente` and comment to null.
    ///
    /// # Errors
    ///
    /// - `OrdoError::Validation` when patient, medication or a date is missing, or a
    ///   referenced record does not exist
    /// - `OrdoError::InvalidDateRange` when `date_fin` is before `date_debut`
    pub fn create(&self, input: PrescriptionInput) -> OrdoResult<Prescription> {
        let values = self.check(input, PrescriptionInput::complete)?;
        let created = self.store.insert_prescription(&values)?;

        tracing::info!(
            prescription_id = created.id,
            patient_id = created.patient_id,
            medication_id = created.medication_id,
            "prescription created"
        );
        Ok(created)
    }

    /// Replaces every field of a prescription. Omitted optional fields fall back to their
    /// defaults, exactly as on create.
    ///
    /// # Errors
    ///
    /// `OrdoError::NotFound` takes precedence over any problem with the request values.
    pub fn update(&self, id: i64, input: PrescriptionInput) -> OrdoResult<Prescription> {
        self.get(id)?;
        let values = self.check(input, PrescriptionInput::complete)?;
        self.write(id, &values)
    }

    /// Changes only the supplied fields. The date rule is checked on the merged record.
    pub fn partial_update(&self, id: i64, input: PrescriptionInput) -> OrdoResult<Prescription> {
        let existing = self.get(id)?;
        let values = self.check(input, |input| input.merge_onto(&existing))?;
        self.write(id, &values)
    }

    pub fn delete(&self, id: i64) -> OrdoResult<()> {
        if !self.store.delete_prescription(id)? {
            return Err(not_found(id));
        }
        tracing::info!(prescription_id = id, "prescription deleted");
        Ok(())
    }

    fn write(&self, id: i64, values: &NewPrescription) -> OrdoResult<Prescription> {
        let updated = self
            .store
            .update_prescription(id, values)?
            .ok_or(not_found(id))?;
        tracing::info!(prescription_id = id, status = %updated.status, "prescription updated");
        Ok(updated)
    }

    /// Runs the reference and shape checks, then the date rule.
    fn check<F>(&self, input: PrescriptionInput, shape: F) -> OrdoResult<NewPrescription>
    where
        F: FnOnce(PrescriptionInput) -> Result<NewPrescription, FieldErrors>,
    {
        let mut errors = self.reference_errors(&input)?;

        let values = match shape(input) {
            Ok(values) => values,
            Err(shape_errors) => {
                errors.merge(shape_errors);
                return Err(OrdoError::Validation(errors));
            }
        };
        errors.into_result()?;

        validate_prescription_dates(values.start_date, values.end_date)?;
        Ok(values)
    }

    fn reference_errors(&self, input: &PrescriptionInput) -> OrdoResult<FieldErrors> {
        let mut errors = FieldErrors::new();

        if let Some(&id) = input.patient.value() {
            if !self.store.patient_exists(id)? {
                errors.push("patient", invalid_pk(id));
            }
        }
        if let Some(&id) = input.medication.value() {
            if !self.store.medication_exists(id)? {
                errors.push("medication", invalid_pk(id));
            }
        }

        if !errors.is_empty() {
            tracing::warn!(%errors, "prescription references unknown records");
        }
        Ok(errors)
    }
}

fn not_found(id: i64) -> OrdoError {
    OrdoError::NotFound {
        entity: "prescription",
        id,
    }
}

fn invalid_pk(id: i64) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}
