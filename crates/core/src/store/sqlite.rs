//! SQLite implementation of [`Store`].
//!
//! One connection guarded by a mutex; every trait method takes the lock for the duration of a
//! single statement (or a statement plus its follow-up read), which gives per-record atomicity.
//! Foreign keys are switched on for the connection so that `ON DELETE CASCADE` from patients
//! and medications to prescriptions is honoured.
//!
//! Filters are applied to the rows in canonical order as they are read, so every clause keeps
//! the exact semantics of [`crate::filters`] (including Unicode case folding, which SQLite's
//! `LIKE` does not offer).

use super::Store;
use crate::config::CoreConfig;
use crate::constants::MSG_DUPLICATE_CODE;
use crate::medication::UnknownStatus;
use crate::validation::validate_prescription_dates;
use crate::{
    FieldErrors, Medication, MedicationFilter, MedicationStatus, NewMedication, NewPatient,
    NewPrescription, NonEmptyText, OrdoError, OrdoResult, Patient, PatientFilter, Prescription,
    PrescriptionFilter, PrescriptionStatus,
};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{ffi, params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

/// Schema migrations, applied in order on open. Each script records its own version.
const MIGRATIONS: &[(i64, &str)] = &[(1, include_str!("../../migrations/001_initial.sql"))];

const PATIENT_COLUMNS: &str = "id, last_name, first_name, birth_date";
const MEDICATION_COLUMNS: &str = "id, code, label, status";
const PRESCRIPTION_COLUMNS: &str =
    "id, patient_id, medication_id, start_date, end_date, status, comment";

/// Relational store backed by a single SQLite connection.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database file at `path` and brings its schema up to date.
    ///
    /// # Errors
    ///
    /// Returns `OrdoError::Database` if the file cannot be opened, or `OrdoError::Migration`
    /// if a schema migration fails.
    pub fn open(path: &Path) -> OrdoResult<Self> {
        tracing::info!("opening database at {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    /// Opens a private in-memory database with the full schema.
    pub fn open_in_memory() -> OrdoResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    /// Opens the database selected by the configuration.
    pub fn from_config(cfg: &CoreConfig) -> OrdoResult<Self> {
        if cfg.is_in_memory() {
            Self::open_in_memory()
        } else {
            Self::open(cfg.database_path())
        }
    }

    fn with_connection(conn: Connection) -> OrdoResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Highest applied schema version.
    pub fn schema_version(&self) -> OrdoResult<i64> {
        Ok(current_version(&*self.conn()?))
    }

    fn conn(&self) -> OrdoResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| OrdoError::LockPoisoned)
    }
}

fn run_migrations(conn: &Connection) -> OrdoResult<()> {
    let current = current_version(conn);

    for &(version, sql) in MIGRATIONS {
        if version > current {
            tracing::info!("running migration v{version}");
            conn.execute_batch(sql)
                .map_err(|e| OrdoError::Migration {
                    version,
                    reason: e.to_string(),
                })?;
        }
    }

    Ok(())
}

/// 0 when the schema has never been created.
fn current_version(conn: &Connection) -> i64 {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, Option<i64>>(0)
    })
    .ok()
    .flatten()
    .unwrap_or(0)
}

fn constraint_kind(err: &rusqlite::Error) -> Option<i32> {
    match err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            Some(e.extended_code)
        }
        _ => None,
    }
}

/// Maps constraint failures of a prescription write to client errors.
fn prescription_write_error(err: rusqlite::Error, values: &NewPrescription) -> OrdoError {
    match constraint_kind(&err) {
        Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => OrdoError::Validation(FieldErrors::non_field(
            "Referenced patient or medication does not exist.",
        )),
        Some(ffi::SQLITE_CONSTRAINT_CHECK) => OrdoError::InvalidDateRange {
            start_date: values.start_date,
            end_date: values.end_date,
        },
        _ => OrdoError::Database(err),
    }
}

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        last_name: row.get(1)?,
        first_name: row.get(2)?,
        birth_date: row.get(3)?,
    })
}

fn medication_from_row(row: &Row<'_>) -> rusqlite::Result<Medication> {
    Ok(Medication {
        id: row.get(0)?,
        code: row.get(1)?,
        label: row.get(2)?,
        status: row.get(3)?,
    })
}

fn prescription_from_row(row: &Row<'_>) -> rusqlite::Result<Prescription> {
    Ok(Prescription {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        medication_id: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        status: row.get(5)?,
        comment: row.get(6)?,
    })
}

impl Store for SqliteStore {
    fn insert_patient(&self, new: &NewPatient) -> OrdoResult<Patient> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO patients (last_name, first_name, birth_date) VALUES (?1, ?2, ?3)",
            params![new.last_name, new.first_name, new.birth_date],
        )?;
        let id = conn.last_insert_rowid();
        tracing::info!(patient_id = id, "patient created");

        Ok(Patient {
            id,
            last_name: new.last_name.clone(),
            first_name: new.first_name.clone(),
            birth_date: new.birth_date,
        })
    }

    fn patient_exists(&self, id: i64) -> OrdoResult<bool> {
        let conn = self.conn()?;
        let exists = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM patients WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn list_patients(&self, filter: &PatientFilter) -> OrdoResult<Vec<Patient>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients ORDER BY last_name, first_name, id"
        ))?;

        let mut patients = Vec::new();
        for row in stmt.query_map([], patient_from_row)? {
            let patient = row?;
            if filter.matches(&patient) {
                patients.push(patient);
            }
        }
        Ok(patients)
    }

    fn delete_patient(&self, id: i64) -> OrdoResult<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM patients WHERE id = ?1", params![id])? > 0;
        if deleted {
            tracing::info!(patient_id = id, "patient deleted with its prescriptions");
        }
        Ok(deleted)
    }

    fn insert_medication(&self, new: &NewMedication) -> OrdoResult<Medication> {
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT INTO medications (code, label, status) VALUES (?1, ?2, ?3)",
            params![new.code, new.label, new.status],
        );
        if let Err(err) = inserted {
            return Err(match constraint_kind(&err) {
                Some(ffi::SQLITE_CONSTRAINT_UNIQUE) => {
                    OrdoError::Validation(FieldErrors::single("code", MSG_DUPLICATE_CODE))
                }
                _ => OrdoError::Database(err),
            });
        }
        let id = conn.last_insert_rowid();
        tracing::info!(medication_id = id, code = %new.code, "medication created");

        Ok(Medication {
            id,
            code: new.code.clone(),
            label: new.label.clone(),
            status: new.status,
        })
    }

    fn medication_exists(&self, id: i64) -> OrdoResult<bool> {
        let conn = self.conn()?;
        let exists = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM medications WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn find_medication_by_code(&self, code: &str) -> OrdoResult<Option<Medication>> {
        let conn = self.conn()?;
        let medication = conn
            .query_row(
                &format!("SELECT {MEDICATION_COLUMNS} FROM medications WHERE code = ?1"),
                params![code],
                medication_from_row,
            )
            .optional()?;
        Ok(medication)
    }

    fn list_medications(&self, filter: &MedicationFilter) -> OrdoResult<Vec<Medication>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {MEDICATION_COLUMNS} FROM medications ORDER BY code"
        ))?;

        let mut medications = Vec::new();
        for row in stmt.query_map([], medication_from_row)? {
            let medication = row?;
            if filter.matches(&medication) {
                medications.push(medication);
            }
        }
        Ok(medications)
    }

    fn delete_medication(&self, id: i64) -> OrdoResult<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM medications WHERE id = ?1", params![id])? > 0;
        if deleted {
            tracing::info!(medication_id = id, "medication deleted with its prescriptions");
        }
        Ok(deleted)
    }

    fn insert_prescription(&self, new: &NewPrescription) -> OrdoResult<Prescription> {
        validate_prescription_dates(new.start_date, new.end_date)?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO prescriptions (patient_id, medication_id, start_date, end_date, status, comment)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.patient_id,
                new.medication_id,
                new.start_date,
                new.end_date,
                new.status,
                new.comment,
            ],
        )
        .map_err(|e| prescription_write_error(e, new))?;
        let id = conn.last_insert_rowid();

        Ok(Prescription {
            id,
            patient_id: new.patient_id,
            medication_id: new.medication_id,
            start_date: new.start_date,
            end_date: new.end_date,
            status: new.status,
            comment: new.comment.clone(),
        })
    }

    fn get_prescription(&self, id: i64) -> OrdoResult<Option<Prescription>> {
        let conn = self.conn()?;
        let prescription = conn
            .query_row(
                &format!("SELECT {PRESCRIPTION_COLUMNS} FROM prescriptions WHERE id = ?1"),
                params![id],
                prescription_from_row,
            )
            .optional()?;
        Ok(prescription)
    }

    fn update_prescription(
        &self,
        id: i64,
        values: &NewPrescription,
    ) -> OrdoResult<Option<Prescription>> {
        validate_prescription_dates(values.start_date, values.end_date)?;

        let conn = self.conn()?;
        let changed = conn
            .execute(
                "UPDATE prescriptions
                 SET patient_id = ?1, medication_id = ?2, start_date = ?3, end_date = ?4,
                     status = ?5, comment = ?6
                 WHERE id = ?7",
                params![
                    values.patient_id,
                    values.medication_id,
                    values.start_date,
                    values.end_date,
                    values.status,
                    values.comment,
                    id,
                ],
            )
            .map_err(|e| prescription_write_error(e, values))?;

        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(Prescription {
            id,
            patient_id: values.patient_id,
            medication_id: values.medication_id,
            start_date: values.start_date,
            end_date: values.end_date,
            status: values.status,
            comment: values.comment.clone(),
        }))
    }

    fn delete_prescription(&self, id: i64) -> OrdoResult<bool> {
        let conn = self.conn()?;
        Ok(conn.execute("DELETE FROM prescriptions WHERE id = ?1", params![id])? > 0)
    }

    fn list_prescriptions(&self, filter: &PrescriptionFilter) -> OrdoResult<Vec<Prescription>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PRESCRIPTION_COLUMNS} FROM prescriptions ORDER BY start_date DESC, id ASC"
        ))?;

        let mut prescriptions = Vec::new();
        for row in stmt.query_map([], prescription_from_row)? {
            let prescription = row?;
            if filter.matches(&prescription) {
                prescriptions.push(prescription);
            }
        }
        Ok(prescriptions)
    }
}

impl ToSql for NonEmptyText {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for NonEmptyText {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        NonEmptyText::new(value.as_str()?).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

impl ToSql for MedicationStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for MedicationStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        parse_code(value)
    }
}

impl ToSql for PrescriptionStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for PrescriptionStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        parse_code(value)
    }
}

fn parse_code<T>(value: ValueRef<'_>) -> FromSqlResult<T>
where
    T: FromStr<Err = UnknownStatus>,
{
    value
        .as_str()?
        .parse()
        .map_err(|e: UnknownStatus| FromSqlError::Other(Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{PatientClause, PrescriptionClause};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid test date")
    }

    fn seeded() -> (SqliteStore, Patient, Medication) {
        let store = SqliteStore::open_in_memory().expect("open in-memory store");
        let patient = store
            .insert_patient(&NewPatient::new("Martin", "Jeanne", Some(date("1992-03-10"))).unwrap())
            .expect("insert patient");
        let medication = store
            .insert_medication(
                &NewMedication::new("PARA500", "Paracétamol 500mg", MedicationStatus::Active)
                    .unwrap(),
            )
            .expect("insert medication");
        (store, patient, medication)
    }

    fn new_prescription(patient: &Patient, medication: &Medication, start: &str, end: &str) -> NewPrescription {
        NewPrescription {
            patient_id: patient.id,
            medication_id: medication.id,
            start_date: date(start),
            end_date: date(end),
            status: PrescriptionStatus::default(),
            comment: None,
        }
    }

    #[test]
    fn open_applies_schema_and_enables_foreign_keys() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.schema_version().unwrap(), 1);

        let conn = store.conn().unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn migrations_are_idempotent() {
        let store = SqliteStore::open_in_memory().unwrap();
        let conn = store.conn().unwrap();
        run_migrations(&conn).expect("second run should be a no-op");
        assert_eq!(current_version(&conn), 1);
    }

    #[test]
    fn file_database_survives_reopen() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("ordo.sqlite3");

        {
            let store = SqliteStore::open(&path).unwrap();
            store
                .insert_patient(&NewPatient::new("Durand", "Jean", None).unwrap())
                .unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let patients = store.list_patients(&PatientFilter::all()).unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].last_name.as_str(), "Durand");
        assert_eq!(patients[0].birth_date, None);
    }

    #[test]
    fn insert_and_get_prescription() {
        let (store, patient, medication) = seeded();
        let created = store
            .insert_prescription(&new_prescription(&patient, &medication, "2025-01-01", "2025-01-31"))
            .unwrap();

        let fetched = store.get_prescription(created.id).unwrap().expect("stored");
        assert_eq!(fetched, created);
        assert_eq!(fetched.status, PrescriptionStatus::Pending);
        assert_eq!(fetched.comment, None);
    }

    #[test]
    fn get_missing_prescription_is_none() {
        let (store, _, _) = seeded();
        assert!(store.get_prescription(9999).unwrap().is_none());
    }

    #[test]
    fn insert_rejects_inverted_dates_without_writing() {
        let (store, patient, medication) = seeded();
        let err = store
            .insert_prescription(&new_prescription(&patient, &medication, "2025-01-31", "2025-01-01"))
            .expect_err("inverted dates");

        assert!(matches!(err, OrdoError::InvalidDateRange { .. }));
        assert!(store
            .list_prescriptions(&PrescriptionFilter::all())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn five_digit_years_are_rejected_before_reaching_text_storage() {
        let (store, patient, medication) = seeded();
        let mut values = new_prescription(&patient, &medication, "2025-01-01", "2025-01-31");
        values.end_date = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();

        let err = store.insert_prescription(&values).expect_err("year 10000");
        match err {
            OrdoError::Validation(errors) => assert!(errors.get("date_fin").is_some()),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(store
            .list_prescriptions(&PrescriptionFilter::all())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn late_four_digit_years_store_and_sort_chronologically() {
        let (store, patient, medication) = seeded();
        let far = store
            .insert_prescription(&new_prescription(&patient, &medication, "9999-01-01", "9999-12-31"))
            .unwrap();
        let near = store
            .insert_prescription(&new_prescription(&patient, &medication, "2025-01-01", "2025-01-31"))
            .unwrap();

        let listed = store.list_prescriptions(&PrescriptionFilter::all()).unwrap();
        assert_eq!(listed, vec![far, near]);
    }

    #[test]
    fn schema_check_constraint_backs_the_date_rule() {
        let (store, patient, medication) = seeded();
        let conn = store.conn().unwrap();
        let err = conn
            .execute(
                "INSERT INTO prescriptions (patient_id, medication_id, start_date, end_date)
                 VALUES (?1, ?2, '2025-01-31', '2025-01-01')",
                params![patient.id, medication.id],
            )
            .expect_err("CHECK constraint");
        assert_eq!(constraint_kind(&err), Some(ffi::SQLITE_CONSTRAINT_CHECK));
    }

    #[test]
    fn insert_with_unknown_patient_is_a_validation_error() {
        let (store, patient, medication) = seeded();
        let mut values = new_prescription(&patient, &medication, "2025-01-01", "2025-01-31");
        values.patient_id = 9999;

        let err = store.insert_prescription(&values).expect_err("dangling reference");
        assert!(matches!(err, OrdoError::Validation(_)));
    }

    #[test]
    fn update_overwrites_all_fields() {
        let (store, patient, medication) = seeded();
        let created = store
            .insert_prescription(&new_prescription(&patient, &medication, "2025-01-01", "2025-01-31"))
            .unwrap();

        let mut values = NewPrescription::from(&created);
        values.status = PrescriptionStatus::Valid;
        values.comment = Some("Dosage réduit".into());
        values.end_date = date("2025-02-15");

        let updated = store
            .update_prescription(created.id, &values)
            .unwrap()
            .expect("exists");
        assert_eq!(store.get_prescription(created.id).unwrap(), Some(updated.clone()));
        assert_eq!(updated.end_date, date("2025-02-15"));
        assert_eq!(updated.comment.as_deref(), Some("Dosage réduit"));
    }

    #[test]
    fn update_missing_prescription_is_none() {
        let (store, patient, medication) = seeded();
        let values = new_prescription(&patient, &medication, "2025-01-01", "2025-01-31");
        assert!(store.update_prescription(9999, &values).unwrap().is_none());
    }

    #[test]
    fn update_with_inverted_dates_leaves_record_untouched() {
        let (store, patient, medication) = seeded();
        let created = store
            .insert_prescription(&new_prescription(&patient, &medication, "2025-01-01", "2025-01-31"))
            .unwrap();

        let values = new_prescription(&patient, &medication, "2025-02-28", "2025-02-01");
        assert!(store.update_prescription(created.id, &values).is_err());
        assert_eq!(store.get_prescription(created.id).unwrap(), Some(created));
    }

    #[test]
    fn delete_prescription_reports_existence() {
        let (store, patient, medication) = seeded();
        let created = store
            .insert_prescription(&new_prescription(&patient, &medication, "2025-01-01", "2025-01-31"))
            .unwrap();

        assert!(store.delete_prescription(created.id).unwrap());
        assert!(!store.delete_prescription(created.id).unwrap());
        assert!(store.get_prescription(created.id).unwrap().is_none());
    }

    #[test]
    fn duplicate_medication_code_is_rejected() {
        let (store, _, _) = seeded();
        let err = store
            .insert_medication(
                &NewMedication::new("PARA500", "Doublon", MedicationStatus::Active).unwrap(),
            )
            .expect_err("duplicate code");

        match err {
            OrdoError::Validation(errors) => {
                assert_eq!(errors.get("code").unwrap()[0], MSG_DUPLICATE_CODE)
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(store.find_medication_by_code("PARA500").unwrap().is_some());
    }

    #[test]
    fn deleting_patient_cascades_to_prescriptions() {
        let (store, patient, medication) = seeded();
        let other = store
            .insert_patient(&NewPatient::new("Durand", "Jean", None).unwrap())
            .unwrap();
        store
            .insert_prescription(&new_prescription(&patient, &medication, "2025-01-01", "2025-01-31"))
            .unwrap();
        let kept = store
            .insert_prescription(&new_prescription(&other, &medication, "2025-02-01", "2025-02-28"))
            .unwrap();

        assert!(store.delete_patient(patient.id).unwrap());
        assert!(!store.patient_exists(patient.id).unwrap());

        let remaining = store.list_prescriptions(&PrescriptionFilter::all()).unwrap();
        assert_eq!(remaining, vec![kept]);
    }

    #[test]
    fn deleting_medication_cascades_to_prescriptions() {
        let (store, patient, medication) = seeded();
        store
            .insert_prescription(&new_prescription(&patient, &medication, "2025-01-01", "2025-01-31"))
            .unwrap();

        assert!(store.delete_medication(medication.id).unwrap());
        assert!(!store.delete_medication(medication.id).unwrap());
        assert!(store
            .list_prescriptions(&PrescriptionFilter::all())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn prescriptions_are_listed_newest_start_first_then_by_id() {
        let (store, patient, medication) = seeded();
        let january = store
            .insert_prescription(&new_prescription(&patient, &medication, "2025-01-01", "2025-01-31"))
            .unwrap();
        let march_a = store
            .insert_prescription(&new_prescription(&patient, &medication, "2025-03-01", "2025-03-31"))
            .unwrap();
        let march_b = store
            .insert_prescription(&new_prescription(&patient, &medication, "2025-03-01", "2025-03-15"))
            .unwrap();

        let ids: Vec<i64> = store
            .list_prescriptions(&PrescriptionFilter::all())
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![march_a.id, march_b.id, january.id]);
    }

    #[test]
    fn list_applies_filter_clauses() {
        let (store, patient, medication) = seeded();
        store
            .insert_prescription(&new_prescription(&patient, &medication, "2025-01-01", "2025-01-31"))
            .unwrap();
        let february = store
            .insert_prescription(&new_prescription(&patient, &medication, "2025-02-01", "2025-02-28"))
            .unwrap();

        let filter = PrescriptionFilter::all()
            .with(PrescriptionClause::PatientIs(patient.id))
            .with(PrescriptionClause::StartsOnOrAfter(date("2025-02-01")));
        assert_eq!(store.list_prescriptions(&filter).unwrap(), vec![february]);
    }

    #[test]
    fn patients_are_ordered_by_name_then_id() {
        let store = SqliteStore::open_in_memory().unwrap();
        for (last, first) in [("Martin", "Paul"), ("Durand", "Jean"), ("Martin", "Jeanne")] {
            store
                .insert_patient(&NewPatient::new(last, first, None).unwrap())
                .unwrap();
        }

        let names: Vec<String> = store
            .list_patients(&PatientFilter::all())
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["Durand Jean", "Martin Jeanne", "Martin Paul"]);

        let filter = PatientFilter::all().with(PatientClause::LastNameContains("mart".into()));
        assert_eq!(store.list_patients(&filter).unwrap().len(), 2);
    }

    #[test]
    fn medications_are_ordered_by_code() {
        let (store, _, _) = seeded();
        store
            .insert_medication(
                &NewMedication::new("IBU200", "Ibuprofène 200mg", MedicationStatus::Removed)
                    .unwrap(),
            )
            .unwrap();

        let medications = store.list_medications(&MedicationFilter::all()).unwrap();
        let codes: Vec<&str> = medications.iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, vec!["IBU200", "PARA500"]);
        assert_eq!(medications[0].status, MedicationStatus::Removed);
    }
}
