use clap::{Parser, Subcommand};
use ordo_core::{
    config::database_path_from_env_value,
    filters::QueryParams,
    seed::{seed_demo, seed_prescriptions, DEFAULT_PRESCRIPTION_COUNT},
    CoreConfig, MedicationService, OrdoError, PatientService, PrescriptionService, SqliteStore,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ordo")]
#[command(about = "Ordo prescription service administration CLI")]
struct Cli {
    /// SQLite database file (defaults to $ORDO_DATABASE_PATH, then ordo.sqlite3)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    Migrate,
    /// Insert demo patients and medications
    SeedDemo,
    /// Generate random prescriptions over existing patients and medications
    SeedPrescriptions {
        /// Number of prescriptions to create
        #[arg(long, default_value_t = DEFAULT_PRESCRIPTION_COUNT)]
        prescriptions: usize,
    },
    /// List all patients
    ListPatients,
    /// List all medications
    ListMedications,
    /// List all prescriptions, newest start date first
    ListPrescriptions,
    /// Delete a patient and its prescriptions
    DeletePatient {
        /// Patient id
        id: i64,
    },
    /// Delete a medication and its prescriptions
    DeleteMedication {
        /// Medication id
        id: i64,
    },
}

fn open_store(database: Option<PathBuf>) -> Result<SqliteStore, Box<dyn std::error::Error>> {
    let path = database.unwrap_or_else(|| {
        database_path_from_env_value(std::env::var("ORDO_DATABASE_PATH").ok())
    });
    let cfg = CoreConfig::new(path)?;
    Ok(SqliteStore::from_config(&cfg)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'ordo --help' for commands");
        return Ok(());
    };

    let store = Arc::new(open_store(cli.database)?);
    let patients = PatientService::new(store.clone());
    let medications = MedicationService::new(store.clone());
    let no_filters = QueryParams::new();

    match command {
        Commands::Migrate => {
            println!("Database schema is at version {}", store.schema_version()?);
        }
        Commands::SeedDemo => match seed_demo(&patients, &medications) {
            Ok(summary) => println!(
                "Created {} patients and {} medications.",
                summary.patients, summary.medications
            ),
            Err(e) => eprintln!("Error seeding demo data: {}", e),
        },
        Commands::SeedPrescriptions { prescriptions } => {
            match seed_prescriptions(&*store, prescriptions, &mut rand::thread_rng()) {
                Ok(created) => println!("Created {} prescriptions.", created),
                Err(e) => eprintln!("Error seeding prescriptions: {}", e),
            }
        }
        Commands::ListPatients => {
            let listed = patients.list(&no_filters)?;
            if listed.is_empty() {
                println!("No patients found.");
            }
            for patient in listed {
                let born = patient
                    .birth_date
                    .map(|d| d.format("%d/%m/%Y").to_string())
                    .unwrap_or_else(|| "-".into());
                println!(
                    "ID: {}, Name: {} {}, Born: {}",
                    patient.id, patient.last_name, patient.first_name, born
                );
            }
        }
        Commands::ListMedications => {
            let listed = medications.list(&no_filters)?;
            if listed.is_empty() {
                println!("No medications found.");
            }
            for medication in listed {
                println!("ID: {}, {}", medication.id, medication);
            }
        }
        Commands::ListPrescriptions => {
            let prescriptions = PrescriptionService::new(store.clone()).list(&no_filters)?;
            if prescriptions.is_empty() {
                println!("No prescriptions found.");
            }
            for p in prescriptions {
                println!(
                    "ID: {}, Patient: {}, Medication: {}, {} -> {}, Status: {}, Comment: {}",
                    p.id,
                    p.patient_id,
                    p.medication_id,
                    p.start_date,
                    p.end_date,
                    p.status,
                    p.comment.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::DeletePatient { id } => match patients.delete(id) {
            Ok(()) => println!("Deleted patient {} and its prescriptions", id),
            Err(OrdoError::NotFound { .. }) => eprintln!("No patient with id {}", id),
            Err(e) => eprintln!("Error deleting patient: {}", e),
        },
        Commands::DeleteMedication { id } => match medications.delete(id) {
            Ok(()) => println!("Deleted medication {} and its prescriptions", id),
            Err(OrdoError::NotFound { .. }) => eprintln!("No medication with id {}", id),
            Err(e) => eprintln!("Error deleting medication: {}", e),
        },
    }

    Ok(())
}
