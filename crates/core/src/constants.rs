//! Constants used throughout the Ordo core crate.
//!
//! Defaults, field limits and the user-facing validation messages live here so that the
//! services, the store and the REST layer report identical wording.

/// Default SQLite database file when no explicit path is configured.
pub const DEFAULT_DATABASE_PATH: &str = "ordo.sqlite3";

/// Database path value selecting a private in-memory database.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Maximum length of a patient's last or first name.
pub const PATIENT_NAME_MAX_LEN: usize = 150;

/// Maximum length of a medication code.
pub const MEDICATION_CODE_MAX_LEN: usize = 64;

/// Maximum length of a medication label.
pub const MEDICATION_LABEL_MAX_LEN: usize = 255;

/// Field key used for errors that are not tied to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Reported when a mandatory field is absent from the request.
pub const MSG_REQUIRED: &str = "This field is required.";

/// Reported when a non-nullable field is explicitly set to null.
pub const MSG_NOT_NULL: &str = "This field may not be null.";

/// Reported when `date_fin` precedes `date_debut`.
pub const MSG_INVALID_DATE_RANGE: &str =
    "La date de fin doit être supérieure ou égale à la date de début.";

/// Reported when a query parameter expected an integer identity.
pub const MSG_INVALID_INTEGER: &str = "A valid integer is required.";

/// Reported when a query parameter expected an ISO date.
pub const MSG_INVALID_DATE: &str = "Date has wrong format. Use YYYY-MM-DD.";

/// Reported when a medication code is already taken.
pub const MSG_DUPLICATE_CODE: &str = "medication with this code already exists.";

/// Reported when a date falls outside years 1 to 9999.
pub const MSG_DATE_OUT_OF_RANGE: &str = "Date must have a four-digit year (0001 to 9999).";

/// Earliest and latest years a stored date may have. Dates are stored as ISO text, which only
/// sorts chronologically within this range.
pub const MIN_STORED_YEAR: i32 = 1;
pub const MAX_STORED_YEAR: i32 = 9999;
