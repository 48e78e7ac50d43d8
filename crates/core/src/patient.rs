//! Patient domain type.

use crate::constants::{MSG_DATE_OUT_OF_RANGE, PATIENT_NAME_MAX_LEN};
use crate::validation::is_storable_date;
use crate::{FieldErrors, NonEmptyText, OrdoError, OrdoResult};
use chrono::NaiveDate;

/// A stored patient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patient {
    pub id: i64,
    pub last_name: NonEmptyText,
    pub first_name: NonEmptyText,
    pub birth_date: Option<NaiveDate>,
}

/// Values for a patient that has not been persisted yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPatient {
    pub last_name: NonEmptyText,
    pub first_name: NonEmptyText,
    pub birth_date: Option<NaiveDate>,
}

impl NewPatient {
    /// Validates raw names and builds a `NewPatient`.
    ///
    /// # Errors
    ///
    /// Returns `OrdoError::Validation` keyed by `last_name` and/or `first_name` when a name is
    /// blank or longer than 150 characters, and by `birth_date` when its year is not four digits.
    pub fn new(
        last_name: &str,
        first_name: &str,
        birth_date: Option<NaiveDate>,
    ) -> OrdoResult<Self> {
        let last = NonEmptyText::bounded(last_name, PATIENT_NAME_MAX_LEN);
        let first = NonEmptyText::bounded(first_name, PATIENT_NAME_MAX_LEN);
        let birth_ok = birth_date.map_or(true, is_storable_date);

        match (last, first) {
            (Ok(last_name), Ok(first_name)) if birth_ok => Ok(Self {
                last_name,
                first_name,
                birth_date,
            }),
            (last, first) => {
                let mut errors = FieldErrors::new();
                if let Err(e) = last {
                    errors.push("last_name", e.to_string());
                }
                if let Err(e) = first {
                    errors.push("first_name", e.to_string());
                }
                if !birth_ok {
                    errors.push("birth_date", MSG_DATE_OUT_OF_RANGE);
                }
                Err(OrdoError::Validation(errors))
            }
        }
    }
}

impl std::fmt::Display for Patient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.last_name, self.first_name)
    }
}
