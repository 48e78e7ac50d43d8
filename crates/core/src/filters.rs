//! Query filter builder.
//!
//! Translates the optional query parameters of a list request into a [`Filter`]: a list of
//! clauses that are all required to hold (logical AND). Parameters that are missing or empty
//! add no clause at all.
//!
//! Each resource has a static table of recognised parameters. A table row lists the names the
//! parameter answers to, in precedence order, and the function turning its raw value into a
//! clause. Rows are applied top to bottom; for a row with several names the first one present
//! with a non-empty value wins and the others are ignored.
//!
//! | Resource     | Parameter (aliases)            | Clause                                  |
//! |--------------|--------------------------------|-----------------------------------------|
//! | Prescription | `patient_id`, `patient`        | patient identity equals                 |
//! | Prescription | `medication_id`, `medication`  | medication identity equals              |
//! | Prescription | `status`                       | status equals (input lower-cased)       |
//! | Prescription | `date_debut_from`              | start date on or after                  |
//! | Prescription | `date_debut_to`                | start date on or before                 |
//! | Prescription | `date_fin_from`                | end date on or after                    |
//! | Prescription | `date_fin_to`                  | end date on or before                   |
//! | Patient      | `nom`, `last_name`             | last name contains (case-insensitive)   |
//! | Patient      | `prenom`, `first_name`         | first name contains (case-insensitive)  |
//! | Patient      | `date_naissance`, `birth_date` | birth date equals                       |
//! | Medication   | `code`                         | code contains (case-insensitive)        |
//! | Medication   | `label`                        | label contains (case-insensitive)       |
//! | Medication   | `status`                       | status equals (input lower-cased)       |

use crate::constants::{MSG_INVALID_DATE, MSG_INVALID_INTEGER};
use crate::{FieldErrors, Medication, OrdoResult, Patient, Prescription};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Raw query parameters of a list request.
pub type QueryParams = HashMap<String, String>;

/// A single comparison against a record of type `T`.
pub trait Clause<T> {
    fn matches(&self, record: &T) -> bool;
}

/// A conjunction of clauses. The empty filter matches everything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter<C> {
    clauses: Vec<C>,
}

impl<C> Default for Filter<C> {
    fn default() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }
}

impl<C> Filter<C> {
    /// A filter without constraints.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with(mut self, clause: C) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[C] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches<T>(&self, record: &T) -> bool
    where
        C: Clause<T>,
    {
        self.clauses.iter().all(|clause| clause.matches(record))
    }
}

/// Comparisons available on prescriptions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrescriptionClause {
    PatientIs(i64),
    MedicationIs(i64),
    /// Lower-cased status code.
    StatusIs(String),
    StartsOnOrAfter(NaiveDate),
    StartsOnOrBefore(NaiveDate),
    EndsOnOrAfter(NaiveDate),
    EndsOnOrBefore(NaiveDate),
}

impl Clause<Prescription> for PrescriptionClause {
    fn matches(&self, p: &Prescription) -> bool {
        match self {
            PrescriptionClause::PatientIs(id) => p.patient_id == *id,
            PrescriptionClause::MedicationIs(id) => p.medication_id == *id,
            PrescriptionClause::StatusIs(status) => p.status.as_str() == status,
            PrescriptionClause::StartsOnOrAfter(date) => p.start_date >= *date,
            PrescriptionClause::StartsOnOrBefore(date) => p.start_date <= *date,
            PrescriptionClause::EndsOnOrAfter(date) => p.end_date >= *date,
            PrescriptionClause::EndsOnOrBefore(date) => p.end_date <= *date,
        }
    }
}

/// Comparisons available on patients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatientClause {
    /// Lower-cased needle.
    LastNameContains(String),
    /// Lower-cased needle.
    FirstNameContains(String),
    BornOn(NaiveDate),
}

impl Clause<Patient> for PatientClause {
    fn matches(&self, p: &Patient) -> bool {
        match self {
            PatientClause::LastNameContains(needle) => contains_folded(p.last_name.as_str(), needle),
            PatientClause::FirstNameContains(needle) => {
                contains_folded(p.first_name.as_str(), needle)
            }
            PatientClause::BornOn(date) => p.birth_date == Some(*date),
        }
    }
}

/// Comparisons available on medications.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MedicationClause {
    /// Lower-cased needle.
    CodeContains(String),
    /// Lower-cased needle.
    LabelContains(String),
    /// Lower-cased status code.
    StatusIs(String),
}

impl Clause<Medication> for MedicationClause {
    fn matches(&self, m: &Medication) -> bool {
        match self {
            MedicationClause::CodeContains(needle) => contains_folded(m.code.as_str(), needle),
            MedicationClause::LabelContains(needle) => contains_folded(m.label.as_str(), needle),
            MedicationClause::StatusIs(status) => m.status.as_str() == status,
        }
    }
}

pub type PrescriptionFilter = Filter<PrescriptionClause>;
pub type PatientFilter = Filter<PatientClause>;
pub type MedicationFilter = Filter<MedicationClause>;

impl Filter<PrescriptionClause> {
    /// Builds a prescription filter from query parameters.
    ///
    /// # Errors
    ///
    /// Returns `OrdoError::Validation` keyed by parameter name when an identity is not an
    /// integer or a date is not `YYYY-MM-DD`.
    pub fn from_params(params: &QueryParams) -> OrdoResult<Self> {
        build(PRESCRIPTION_PARAMS, params)
    }
}

impl Filter<PatientClause> {
    /// Builds a patient filter from query parameters.
    ///
    /// # Errors
    ///
    /// Returns `OrdoError::Validation` when the birth date is not `YYYY-MM-DD`.
    pub fn from_params(params: &QueryParams) -> OrdoResult<Self> {
        build(PATIENT_PARAMS, params)
    }
}

impl Filter<MedicationClause> {
    /// Builds a medication filter from query parameters. Every value is accepted.
    pub fn from_params(params: &QueryParams) -> OrdoResult<Self> {
        build(MEDICATION_PARAMS, params)
    }
}

/// One row of a parameter table.
struct FilterParam<C> {
    /// Names checked in order; the first present, non-empty one is used.
    names: &'static [&'static str],
    /// Turns the raw value into a clause, or a message reported under the matched name.
    build: fn(&str) -> Result<C, &'static str>,
}

const PRESCRIPTION_PARAMS: &[FilterParam<PrescriptionClause>] = &[
    FilterParam {
        names: &["patient_id", "patient"],
        build: prescription_patient,
    },
    FilterParam {
        names: &["medication_id", "medication"],
        build: prescription_medication,
    },
    FilterParam {
        names: &["status"],
        build: prescription_status,
    },
    FilterParam {
        names: &["date_debut_from"],
        build: prescription_start_from,
    },
    FilterParam {
        names: &["date_debut_to"],
        build: prescription_start_to,
    },
    FilterParam {
        names: &["date_fin_from"],
        build: prescription_end_from,
    },
    FilterParam {
        names: &["date_fin_to"],
        build: prescription_end_to,
    },
];

const PATIENT_PARAMS: &[FilterParam<PatientClause>] = &[
    FilterParam {
        names: &["nom", "last_name"],
        build: patient_last_name,
    },
    FilterParam {
        names: &["prenom", "first_name"],
        build: patient_first_name,
    },
    FilterParam {
        names: &["date_naissance", "birth_date"],
        build: patient_birth_date,
    },
];

const MEDICATION_PARAMS: &[FilterParam<MedicationClause>] = &[
    FilterParam {
        names: &["code"],
        build: medication_code,
    },
    FilterParam {
        names: &["label"],
        build: medication_label,
    },
    FilterParam {
        names: &["status"],
        build: medication_status,
    },
];

fn build<C>(table: &[FilterParam<C>], params: &QueryParams) -> OrdoResult<Filter<C>> {
    let mut errors = FieldErrors::new();
    let mut filter = Filter::all();

    for param in table {
        let Some((name, value)) = first_present(params, param.names) else {
            continue;
        };
        match (param.build)(value) {
            Ok(clause) => filter = filter.with(clause),
            Err(message) => errors.push(name, message),
        }
    }

    errors.into_result()?;
    Ok(filter)
}

fn first_present<'p>(
    params: &'p QueryParams,
    names: &'static [&'static str],
) -> Option<(&'static str, &'p str)> {
    names.iter().find_map(|&name| {
        params
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
            .map(|value| (name, value))
    })
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

fn parse_id(value: &str) -> Result<i64, &'static str> {
    value.parse().map_err(|_| MSG_INVALID_INTEGER)
}

fn parse_date(value: &str) -> Result<NaiveDate, &'static str> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| MSG_INVALID_DATE)
}

fn prescription_patient(value: &str) -> Result<PrescriptionClause, &'static str> {
    parse_id(value).map(PrescriptionClause::PatientIs)
}

fn prescription_medication(value: &str) -> Result<PrescriptionClause, &'static str> {
    parse_id(value).map(PrescriptionClause::MedicationIs)
}

fn prescription_status(value: &str) -> Result<PrescriptionClause, &'static str> {
    Ok(PrescriptionClause::StatusIs(value.to_lowercase()))
}

fn prescription_start_from(value: &str) -> Result<PrescriptionClause, &'static str> {
    parse_date(value).map(PrescriptionClause::StartsOnOrAfter)
}

fn prescription_start_to(value: &str) -> Result<PrescriptionClause, &'static str> {
    parse_date(value).map(PrescriptionClause::StartsOnOrBefore)
}

fn prescription_end_from(value: &str) -> Result<PrescriptionClause, &'static str> {
    parse_date(value).map(PrescriptionClause::EndsOnOrAfter)
}

fn prescription_end_to(value: &str) -> Result<PrescriptionClause, &'static str> {
    parse_date(value).map(PrescriptionClause::EndsOnOrBefore)
}

fn patient_last_name(value: &str) -> Result<PatientClause, &'static str> {
    Ok(PatientClause::LastNameContains(value.to_lowercase()))
}

fn patient_first_name(value: &str) -> Result<PatientClause, &'static str> {
    Ok(PatientClause::FirstNameContains(value.to_lowercase()))
}

fn patient_birth_date(value: &str) -> Result<PatientClause, &'static str> {
    parse_date(value).map(PatientClause::BornOn)
}

fn medication_code(value: &str) -> Result<MedicationClause, &'static str> {
    Ok(MedicationClause::CodeContains(value.to_lowercase()))
}

fn medication_label(value: &str) -> Result<MedicationClause, &'static str> {
    Ok(MedicationClause::LabelContains(value.to_lowercase()))
}

fn medication_status(value: &str) -> Result<MedicationClause, &'static str> {
    Ok(MedicationClause::StatusIs(value.to_lowercase()))
}
