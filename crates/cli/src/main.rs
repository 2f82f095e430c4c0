use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use swasthya_core::{
    config::namespace_from_env_value, constants::DEFAULT_DATA_DIR, ids, AuthGate, CoreConfig,
    DomainStore, EmailAddress, EmergencyQuery, NationalId, NonEmptyText, Patient, PhoneNumber,
    Role,
};

#[derive(Parser)]
#[command(name = "swasthya")]
#[command(about = "Swasthya hospital-records store CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    ListPatients,
    /// List all doctors
    ListDoctors,
    /// Show a single patient record as JSON
    ShowPatient {
        /// Patient record id (e.g. P1001)
        id: String,
    },
    /// Add a patient with a generated id
    AddPatient {
        /// Ten-digit national ID
        national_id: String,
        /// Full name
        name: String,
        /// Age in years
        age: u8,
        /// Blood group (e.g. "A+")
        blood_group: String,
        /// Assigned hospital
        hospital: String,
        /// Login password
        password: String,
        /// Contact phone number (Nepali mobile, 98/97 prefix)
        #[arg(long)]
        phone: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Home address
        #[arg(long, default_value = "")]
        address: String,
    },
    /// Delete a patient by id
    DeletePatient {
        /// Patient record id
        id: String,
    },
    /// Check credentials for a role
    Login {
        /// National ID (patient) or record id (doctor/admin)
        identifier: String,
        /// Password
        password: String,
        /// Role: patient, doctor, or admin
        role: Role,
    },
    /// Emergency critical-data lookup by national ID
    Emergency {
        /// Ten-digit national ID
        national_id: String,
    },
}

fn open_store() -> Result<DomainStore, Box<dyn std::error::Error>> {
    let data_dir = std::env::var("SWASTHYA_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());
    let namespace = namespace_from_env_value(std::env::var("SWASTHYA_NAMESPACE").ok())?;
    let cfg = Arc::new(CoreConfig::new(PathBuf::from(data_dir), namespace)?);
    Ok(DomainStore::initialise(cfg)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ListPatients => {
            let store = open_store()?;
            if store.patients().is_empty() {
                println!("No patients found.");
            } else {
                for patient in store.patients() {
                    println!(
                        "ID: {}, NID: {}, Name: {}, Hospital: {}",
                        patient.id, patient.national_id, patient.name, patient.hospital
                    );
                }
            }
        }
        Commands::ListDoctors => {
            let store = open_store()?;
            if store.doctors().is_empty() {
                println!("No doctors found.");
            } else {
                for doctor in store.doctors() {
                    println!(
                        "ID: {}, Name: {}, Specialty: {}, Hospital: {}",
                        doctor.id, doctor.name, doctor.specialty, doctor.hospital
                    );
                }
            }
        }
        Commands::ShowPatient { id } => {
            let store = open_store()?;
            match store.patient(&id) {
                Some(patient) => println!("{}", serde_json::to_string_pretty(patient)?),
                None => eprintln!("No patient with id {id}"),
            }
        }
        Commands::AddPatient {
            national_id,
            name,
            age,
            blood_group,
            hospital,
            password,
            phone,
            email,
            address,
        } => {
            let mut store = open_store()?;
            let name = NonEmptyText::new(&name)?;
            let phone = phone.map(PhoneNumber::parse).transpose()?;
            let email = email.map(EmailAddress::parse).transpose()?;
            let patient = Patient {
                id: ids::generate(ids::IdPrefix::Patient),
                national_id: NationalId::parse(&national_id)?,
                name: name.as_str().to_string(),
                age,
                blood_group,
                allergies: BTreeSet::new(),
                chronic_diseases: BTreeSet::new(),
                implants: BTreeSet::new(),
                abnormalities: BTreeSet::new(),
                address,
                phone: phone.map(|p| p.as_str().to_string()).unwrap_or_default(),
                email: email.map(|e| e.as_str().to_string()),
                fingerprint: None,
                emergency_contacts: vec![],
                reports: vec![],
                hospital,
                password,
                updated_at: chrono::Utc::now(),
            };
            let id = patient.id.clone();
            match store.add_patient(patient) {
                Ok(()) => println!("Added patient with id {id}"),
                Err(e) => eprintln!("Error adding patient: {e}"),
            }
        }
        Commands::DeletePatient { id } => {
            let mut store = open_store()?;
            if store.delete_patient(&id)? {
                println!("Deleted patient {id}");
            } else {
                println!("No patient with id {id}, nothing to delete");
            }
        }
        Commands::Login {
            identifier,
            password,
            role,
        } => {
            let store = open_store()?;
            let mut gate = AuthGate::new();
            if gate.login(&store, &identifier, &password, role) {
                let session = gate.current().expect("session set on successful login");
                println!("ok: {} ({})", session.user.name(), session.role);
            } else {
                eprintln!("invalid credentials");
                std::process::exit(1);
            }
        }
        Commands::Emergency { national_id } => {
            let store = open_store()?;
            let query = EmergencyQuery::NationalId(NationalId::parse(&national_id)?);
            match store.emergency_lookup(&query) {
                Some(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
                None => {
                    eprintln!("No patient with national ID {national_id}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
