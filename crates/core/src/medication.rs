//! Medication domain type.

use crate::constants::{MEDICATION_CODE_MAX_LEN, MEDICATION_LABEL_MAX_LEN};
use crate::{FieldErrors, NonEmptyText, OrdoError, OrdoResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Availability of a medication in the catalogue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MedicationStatus {
    /// Available for prescribing.
    #[default]
    #[serde(rename = "actif")]
    Active,
    /// Withdrawn from the catalogue.
    #[serde(rename = "suppr")]
    Removed,
}

impl MedicationStatus {
    /// Wire and storage code.
    pub fn as_str(self) -> &'static str {
        match self {
            MedicationStatus::Active => "actif",
            MedicationStatus::Removed => "suppr",
        }
    }
}

/// A status code that is not part of the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status code: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for MedicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "actif" => Ok(MedicationStatus::Active),
            "suppr" => Ok(MedicationStatus::Removed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for MedicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored medication.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Medication {
    pub id: i64,
    pub code: NonEmptyText,
    pub label: NonEmptyText,
    pub status: MedicationStatus,
}

/// Values for a medication that has not been persisted yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMedication {
    pub code: NonEmptyText,
    pub label: NonEmptyText,
    pub status: MedicationStatus,
}

impl NewMedication {
    /// Validates the raw code and label.
    ///
    /// # Errors
    ///
    /// Returns `OrdoError::Validation` keyed by `code` and/or `label`.
    pub fn new(code: &str, label: &str, status: MedicationStatus) -> OrdoResult<Self> {
        let code = NonEmptyText::bounded(code, MEDICATION_CODE_MAX_LEN);
        let label = NonEmptyText::bounded(label, MEDICATION_LABEL_MAX_LEN);

        match (code, label) {
            (Ok(code), Ok(label)) => Ok(Self {
                code,
                label,
                status,
            }),
            (code, label) => {
                let mut errors = FieldErrors::new();
                if let Err(e) = code {
                    errors.push("code", e.to_string());
                }
                if let Err(e) = label {
                    errors.push("label", e.to_string());
                }
                Err(OrdoError::Validation(errors))
            }
        }
    }
}

impl std::fmt::Display for Medication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} ({})", self.code, self.label, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_code() {
        for status in [MedicationStatus::Active, MedicationStatus::Removed] {
            assert_eq!(status.as_str().parse::<MedicationStatus>(), Ok(status));
        }
        assert!("ACTIF".parse::<MedicationStatus>().is_err());
    }

    #[test]
    fn new_medication_reports_every_bad_field() {
        let long_code = "X".repeat(MEDICATION_CODE_MAX_LEN + 1);
        let err = NewMedication::new(&long_code, " ", MedicationStatus::Active)
            .expect_err("both fields are invalid");
        match err {
            OrdoError::Validation(errors) => {
                assert!(errors.get("code").is_some());
                assert!(errors.get("label").is_some());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
