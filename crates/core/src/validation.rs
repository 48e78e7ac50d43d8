//! Date validation rules.
//!
//! The only cross-field constraint in the model is the prescription date range. It is called
//! by every write path (create, full update, partial update) before persistence, and again by
//! the store right before the row is written. The schema carries a matching `CHECK`.
//!
//! Dates are stored as ISO text, so every stored date must also have a four-digit year for
//! the `CHECK` and the ordering to compare them chronologically.

use crate::constants::{MAX_STORED_YEAR, MIN_STORED_YEAR, MSG_DATE_OUT_OF_RANGE};
use crate::{FieldErrors, OrdoError, OrdoResult};
use chrono::{Datelike, NaiveDate};

/// Whether `date` has a year in the storable range.
pub fn is_storable_date(date: NaiveDate) -> bool {
    (MIN_STORED_YEAR..=MAX_STORED_YEAR).contains(&date.year())
}

/// Validates the dates of a prescription: both storable, end on or after start.
///
/// # Errors
///
/// Returns `OrdoError::Validation` keyed by `date_debut`/`date_fin` for a date outside years
/// 1 to 9999, then [`OrdoError::InvalidDateRange`] as [`validate_date_range`] does.
pub fn validate_prescription_dates(start_date: NaiveDate, end_date: NaiveDate) -> OrdoResult<()> {
    let mut errors = FieldErrors::new();
    if !is_storable_date(start_date) {
        errors.push("date_debut", MSG_DATE_OUT_OF_RANGE);
    }
    if !is_storable_date(end_date) {
        errors.push("date_fin", MSG_DATE_OUT_OF_RANGE);
    }
    errors.into_result()?;

    validate_date_range(start_date, end_date)
}

/// Validates that a prescription ends on or after the day it starts.
///
/// Equal dates describe a single-day prescription and are accepted.
///
/// # Errors
///
/// Returns [`OrdoError::InvalidDateRange`] if `end_date < start_date`.
pub fn validate_date_range(start_date: NaiveDate, end_date: NaiveDate) -> OrdoResult<()> {
    if end_date < start_date {
        tracing::warn!(%start_date, %end_date, "rejected prescription date range");
        return Err(OrdoError::InvalidDateRange {
            start_date,
            end_date,
        });
    }

    Ok(())
}
