//! Resource services.
//!
//! Each service wraps a shared [`Store`](crate::Store) and is the only way the binaries touch
//! records. Services turn raw query parameters into filters, check request values, run the
//! date-range rule on every prescription write and map missing records to
//! [`OrdoError::NotFound`](crate::OrdoError::NotFound).
//!
//! ## Pure Data Operations
//!
//! No HTTP concerns live here: status codes and wire shapes belong in `api-rest`.

pub mod medications;
pub mod patients;
pub mod prescriptions;

pub use medications::MedicationService;
pub use patients::PatientService;
pub use prescriptions::PrescriptionService;
