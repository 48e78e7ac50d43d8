//! Prescription domain types.
//!
//! A prescription links one patient to one medication over a closed date range. Besides the
//! stored record this module defines [`PrescriptionInput`], the shape of a create or update
//! request before it has been checked, and the two ways of turning it into storable values:
//! - [`PrescriptionInput::complete`] for create and full update (mandatory fields enforced)
//! - [`PrescriptionInput::merge_onto`] for partial update (unsupplied fields kept)
//!
//! Neither step checks the date range or the referenced identities; the service does both
//! before anything reaches the store.

use crate::constants::{MSG_NOT_NULL, MSG_REQUIRED};
use crate::medication::UnknownStatus;
use crate::FieldErrors;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Lifecycle status of a prescription.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrescriptionStatus {
    /// Approved.
    #[serde(rename = "valide")]
    Valid,
    /// Awaiting approval.
    #[default]
    #[serde(rename = "en_attente")]
    Pending,
    /// Cancelled.
    #[serde(rename = "suppr")]
    Removed,
}

impl PrescriptionStatus {
    /// Wire and storage code.
    pub fn as_str(self) -> &'static str {
        match self {
            PrescriptionStatus::Valid => "valide",
            PrescriptionStatus::Pending => "en_attente",
            PrescriptionStatus::Removed => "suppr",
        }
    }
}

impl FromStr for PrescriptionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "valide" => Ok(PrescriptionStatus::Valid),
            "en_attente" => Ok(PrescriptionStatus::Pending),
            "suppr" => Ok(PrescriptionStatus::Removed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored prescription.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prescription {
    pub id: i64,
    pub patient_id: i64,
    pub medication_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PrescriptionStatus,
    pub comment: Option<String>,
}

/// Complete values for inserting or overwriting a prescription.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPrescription {
    pub patient_id: i64,
    pub medication_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PrescriptionStatus,
    pub comment: Option<String>,
}

impl From<&Prescription> for NewPrescription {
    fn from(p: &Prescription) -> Self {
        Self {
            patient_id: p.patient_id,
            medication_id: p.medication_id,
            start_date: p.start_date,
            end_date: p.end_date,
            status: p.status,
            comment: p.comment.clone(),
        }
    }
}

/// A request field that distinguishes "not sent" from "sent as null".
///
/// Use with `#[serde(default)]` so that a missing key deserialises to [`Supplied::Absent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Supplied<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Supplied<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Supplied::Value(v) => Some(v),
            Supplied::Absent | Supplied::Null => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Supplied::Absent)
    }
}

impl<T> Default for Supplied<T> {
    fn default() -> Self {
        Supplied::Absent
    }
}

impl<T> From<Option<T>> for Supplied<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Supplied::Null, Supplied::Value)
    }
}

impl<'de, T> Deserialize<'de> for Supplied<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Supplied::from)
    }
}

/// Unchecked prescription values as received from a client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrescriptionInput {
    pub patient: Supplied<i64>,
    pub medication: Supplied<i64>,
    pub start_date: Supplied<NaiveDate>,
    pub end_date: Supplied<NaiveDate>,
    pub status: Supplied<PrescriptionStatus>,
    pub comment: Supplied<String>,
}

impl PrescriptionInput {
    /// Builds complete values, requiring patient, medication and both dates.
    ///
    /// Status defaults to [`PrescriptionStatus::Pending`] and comment to `None` when absent.
    pub fn complete(self) -> Result<NewPrescription, FieldErrors> {
        let mut errors = FieldErrors::new();
        let patient_id = required("patient", self.patient, &mut errors);
        let medication_id = required("medication", self.medication, &mut errors);
        let start_date = required("date_debut", self.start_date, &mut errors);
        let end_date = required("date_fin", self.end_date, &mut errors);
        let status = not_null("status", self.status, &mut errors).unwrap_or_default();
        let comment = self.comment.value().cloned();

        match (patient_id, medication_id, start_date, end_date) {
            (Some(patient_id), Some(medication_id), Some(start_date), Some(end_date))
                if errors.is_empty() =>
            {
                Ok(NewPrescription {
                    patient_id,
                    medication_id,
                    start_date,
                    end_date,
                    status,
                    comment,
                })
            }
            _ => Err(errors),
        }
    }

    /// Overlays the supplied fields onto `existing`, keeping everything else unchanged.
    pub fn merge_onto(self, existing: &Prescription) -> Result<NewPrescription, FieldErrors> {
        let mut errors = FieldErrors::new();
        let patient_id = not_null("patient", self.patient, &mut errors);
        let medication_id = not_null("medication", self.medication, &mut errors);
        let start_date = not_null("date_debut", self.start_date, &mut errors);
        let end_date = not_null("date_fin", self.end_date, &mut errors);
        let status = not_null("status", self.status, &mut errors);
        let comment = match self.comment {
            Supplied::Absent => existing.comment.clone(),
            Supplied::Null => None,
            Supplied::Value(comment) => Some(comment),
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewPrescription {
            patient_id: patient_id.unwrap_or(existing.patient_id),
            medication_id: medication_id.unwrap_or(existing.medication_id),
            start_date: start_date.unwrap_or(existing.start_date),
            end_date: end_date.unwrap_or(existing.end_date),
            status: status.unwrap_or(existing.status),
            comment,
        })
    }
}

fn required<T>(field: &str, value: Supplied<T>, errors: &mut FieldErrors) -> Option<T> {
    match value {
        Supplied::Value(v) => Some(v),
        Supplied::Absent => {
            errors.push(field, MSG_REQUIRED);
            None
        }
        Supplied::Null => {
            errors.push(field, MSG_NOT_NULL);
            None
        }
    }
}

fn not_null<T>(field: &str, value: Supplied<T>, errors: &mut FieldErrors) -> Option<T> {
    match value {
        Supplied::Value(v) => Some(v),
        Supplied::Absent => None,
        Supplied::Null => {
            errors.push(field, MSG_NOT_NULL);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid test date")
    }

    fn existing() -> Prescription {
        Prescription {
            id: 1,
            patient_id: 10,
            medication_id: 20,
            start_date: date("2025-01-01"),
            end_date: date("2025-01-31"),
            status: PrescriptionStatus::Valid,
            comment: Some("Original comment".into()),
        }
    }

    #[test]
    fn complete_applies_defaults() {
        let input = PrescriptionInput {
            patient: Supplied::Value(1),
            medication: Supplied::Value(2),
            start_date: Supplied::Value(date("2025-01-01")),
            end_date: Supplied::Value(date("2025-01-31")),
            ..Default::default()
        };

        let new = input.complete().expect("complete input");
        assert_eq!(new.status, PrescriptionStatus::Pending);
        assert_eq!(new.comment, None);
    }

    #[test]
    fn complete_reports_all_missing_fields() {
        let errors = PrescriptionInput::default()
            .complete()
            .expect_err("nothing supplied");

        for field in ["patient", "medication", "date_debut", "date_fin"] {
            assert_eq!(errors.get(field).unwrap()[0], MSG_REQUIRED, "field {field}");
        }
        assert!(errors.get("status").is_none());
    }

    #[test]
    fn complete_rejects_null_status() {
        let input = PrescriptionInput {
            patient: Supplied::Value(1),
            medication: Supplied::Value(2),
            start_date: Supplied::Value(date("2025-01-01")),
            end_date: Supplied::Value(date("2025-01-31")),
            status: Supplied::Null,
            comment: Supplied::Null,
        };

        let errors = input.complete().expect_err("null status");
        assert_eq!(errors.get("status").unwrap()[0], MSG_NOT_NULL);
        assert!(errors.get("comment").is_none());
    }

    #[test]
    fn merge_keeps_unsupplied_fields() {
        let patch = PrescriptionInput {
            status: Supplied::Value(PrescriptionStatus::Removed),
            comment: Supplied::Value("Prescription cancelled".into()),
            ..Default::default()
        };

        let merged = patch.merge_onto(&existing()).expect("valid patch");
        assert_eq!(merged.patient_id, 10);
        assert_eq!(merged.medication_id, 20);
        assert_eq!(merged.start_date, date("2025-01-01"));
        assert_eq!(merged.end_date, date("2025-01-31"));
        assert_eq!(merged.status, PrescriptionStatus::Removed);
        assert_eq!(merged.comment.as_deref(), Some("Prescription cancelled"));
    }

    #[test]
    fn merge_null_comment_clears_it() {
        let patch = PrescriptionInput {
            comment: Supplied::Null,
            ..Default::default()
        };
        let merged = patch.merge_onto(&existing()).expect("valid patch");
        assert_eq!(merged.comment, None);
    }

    #[test]
    fn merge_rejects_null_dates() {
        let patch = PrescriptionInput {
            end_date: Supplied::Null,
            ..Default::default()
        };
        let errors = patch.merge_onto(&existing()).expect_err("null date");
        assert_eq!(errors.get("date_fin").unwrap()[0], MSG_NOT_NULL);
    }

    #[test]
    fn supplied_distinguishes_missing_from_null() {
        #[derive(Deserialize)]
        struct Body {
            #[serde(default)]
            comment: Supplied<String>,
        }

        let missing: Body = serde_json::from_str("{}").unwrap();
        let null: Body = serde_json::from_str(r#"{"comment": null}"#).unwrap();
        let value: Body = serde_json::from_str(r#"{"comment": "x"}"#).unwrap();

        assert!(missing.comment.is_absent());
        assert_eq!(null.comment, Supplied::Null);
        assert_eq!(value.comment, Supplied::Value("x".to_string()));
    }

    #[test]
    fn status_codes_are_french() {
        assert_eq!(
            serde_json::to_value(PrescriptionStatus::Pending).unwrap(),
            "en_attente"
        );
        assert_eq!(
            "valide".parse::<PrescriptionStatus>(),
            Ok(PrescriptionStatus::Valid)
        );
    }
}
