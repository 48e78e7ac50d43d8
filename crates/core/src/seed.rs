//! Demo data.
//!
//! [`seed_demo`] loads a small fixed catalogue of patients and medications through the
//! patient and medication services; [`seed_prescriptions`] then generates random prescriptions
//! over whatever patients and medications exist, writing through the [`Store`].

use crate::filters::QueryParams;
use crate::{
    MedicationFilter, MedicationService, MedicationStatus, NewMedication, NewPatient,
    NewPrescription, OrdoError, OrdoResult, PatientFilter, PatientService, PrescriptionStatus,
    Store,
};
use chrono::{Days, NaiveDate};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of prescriptions generated when the caller does not say.
pub const DEFAULT_PRESCRIPTION_COUNT: usize = 30;

const DEMO_PATIENTS: &[(&str, &str, &str)] = &[
    ("Martin", "Jeanne", "1992-03-10"),
    ("Durand", "Jean", "1980-05-20"),
    ("Bernard", "Claire", "1975-11-02"),
    ("Petit", "Lucas", "2001-07-14"),
    ("Moreau", "Camille", "1968-01-28"),
];

const DEMO_MEDICATIONS: &[(&str, &str, MedicationStatus)] = &[
    ("PARA500", "Paracétamol 500mg", MedicationStatus::Active),
    ("IBU200", "Ibuprofène 200mg", MedicationStatus::Active),
    ("AMOX1G", "Amoxicilline 1g", MedicationStatus::Active),
    ("OMEP20", "Oméprazole 20mg", MedicationStatus::Active),
    ("ASP100", "Aspirine 100mg", MedicationStatus::Removed),
];

const COMMENTS: &[Option<&str>] = &[
    Some("Traitement standard"),
    Some("À renouveler après consultation"),
    Some("Allergie connue à surveiller"),
    Some("Dosage réduit"),
    Some("Prise avec repas"),
    Some("À prendre le soir"),
    Some("Interaction possible avec autres médicaments"),
    Some("Consultation nécessaire avant renouvellement"),
    Some("Prescription annulée"),
    Some("En attente de résultats d'analyse"),
    None,
    None,
];

/// Statuses drawn for generated prescriptions, with their relative weights.
const STATUS_WEIGHTS: &[(PrescriptionStatus, u32)] = &[
    (PrescriptionStatus::Valid, 6),
    (PrescriptionStatus::Pending, 3),
    (PrescriptionStatus::Removed, 1),
];

/// What a call to [`seed_demo`] inserted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub patients: usize,
    pub medications: usize,
}

/// Inserts the demo patients and medications that are not already present.
///
/// Medications are matched on code, patients on name and birth date, so running this twice
/// inserts nothing the second time.
pub fn seed_demo(
    patients: &PatientService,
    medications: &MedicationService,
) -> OrdoResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    let existing = patients.list(&QueryParams::new())?;
    for &(last, first, born) in DEMO_PATIENTS {
        let birth_date = parse_fixed_date(born)?;
        let new = NewPatient::new(last, first, Some(birth_date))?;
        let present = existing.iter().any(|p| {
            p.last_name == new.last_name
                && p.first_name == new.first_name
                && p.birth_date == new.birth_date
        });
        if !present {
            patients.create(&new)?;
            summary.patients += 1;
        }
    }

    for &(code, label, status) in DEMO_MEDICATIONS {
        if medications.find_by_code(code)?.is_none() {
            medications.create(&NewMedication::new(code, label, status)?)?;
            summary.medications += 1;
        }
    }

    tracing::info!(
        patients = summary.patients,
        medications = summary.medications,
        "demo data seeded"
    );
    Ok(summary)
}

/// Creates `count` random prescriptions over the existing patients and medications.
///
/// Start dates fall between 2024-01-01 and 2025-12-31 inclusive and each prescription lasts
/// 7 to 90 days.
///
/// # Errors
///
/// Returns `OrdoError::InvalidInput` when there are no patients or no medications to pick from.
pub fn seed_prescriptions<R: Rng + ?Sized>(
    store: &dyn Store,
    count: usize,
    rng: &mut R,
) -> OrdoResult<usize> {
    let patients = store.list_patients(&PatientFilter::all())?;
    let medications = store.list_medications(&MedicationFilter::all())?;

    if patients.is_empty() {
        return Err(OrdoError::InvalidInput(
            "no patients found; run `ordo seed-demo` first".into(),
        ));
    }
    if medications.is_empty() {
        return Err(OrdoError::InvalidInput(
            "no medications found; run `ordo seed-demo` first".into(),
        ));
    }

    let first_day = parse_fixed_date("2024-01-01")?;
    let last_day = parse_fixed_date("2025-12-31")?;
    let span = last_day.signed_duration_since(first_day).num_days() as u64;
    let statuses = WeightedIndex::new(STATUS_WEIGHTS.iter().map(|&(_, weight)| weight))
        .map_err(|e| OrdoError::InvalidInput(e.to_string()))?;

    let mut created = 0;
    for _ in 0..count {
        let (Some(patient), Some(medication)) =
            (patients.choose(rng), medications.choose(rng))
        else {
            break;
        };
        let start_date = add_days(first_day, rng.gen_range(0..=span))?;
        let end_date = add_days(start_date, rng.gen_range(7..=90))?;
        let status = STATUS_WEIGHTS[statuses.sample(rng)].0;
        let comment = COMMENTS.choose(rng).copied().flatten().map(str::to_string);

        store.insert_prescription(&NewPrescription {
            patient_id: patient.id,
            medication_id: medication.id,
            start_date,
            end_date,
            status,
            comment,
        })?;
        created += 1;
    }

    tracing::info!(count = created, "random prescriptions seeded");
    Ok(created)
}

fn parse_fixed_date(s: &str) -> OrdoResult<NaiveDate> {
    s.parse()
        .map_err(|e| OrdoError::InvalidInput(format!("bad seed date {s}: {e}")))
}

fn add_days(date: NaiveDate, days: u64) -> OrdoResult<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| OrdoError::InvalidInput(format!("{date} + {days} days is out of range")))
}
