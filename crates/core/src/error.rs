use crate::constants::{MSG_INVALID_DATE_RANGE, NON_FIELD_ERRORS};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

/// Validation messages indexed by the wire name of the offending field.
///
/// Serialises as a plain JSON object, e.g. `{"patient": ["This field is required."]}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single message for a single field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    /// A message that is not tied to one field.
    pub fn non_field(message: impl Into<String>) -> Self {
        Self::single(NON_FIELD_ERRORS, message)
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Appends every message of `other`.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Turns the collected messages into an error, or `Ok(())` when nothing was collected.
    pub fn into_result(self) -> OrdoResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(OrdoError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrdoError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("invalid date range: end date {end_date} is before start date {start_date}")]
    InvalidDateRange {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("migration to schema version {version} failed: {reason}")]
    Migration { version: i64, reason: String },
    #[error("store connection lock poisoned")]
    LockPoisoned,
}

impl OrdoError {
    /// Field-indexed view of client-correctable errors.
    ///
    /// Returns `None` for errors that are not the caller's fault (not found, storage failures).
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            OrdoError::Validation(errors) => Some(errors.clone()),
            OrdoError::InvalidDateRange { .. } => {
                Some(FieldErrors::single("date_fin", MSG_INVALID_DATE_RANGE))
            }
            _ => None,
        }
    }
}

pub type OrdoResult<T> = std::result::Result<T, OrdoError>;
