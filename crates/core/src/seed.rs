//! Fixed seed dataset used to populate the store on first run.
//!
//! The data is deliberately small but exercises everything the portals show:
//! two hospitals, prioritised emergency contacts, a fingerprint sample for
//! the emergency screen, and reports in all three statuses.

use crate::records::{
    Admin, DayAvailability, Doctor, EmergencyContact, MedicalReport, Patient, ReportStatus,
    WeeklySchedule,
};
use chrono::Utc;
use std::collections::BTreeSet;
use swasthya_types::NationalId;

fn string_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Seed patient collection.
pub fn seed_patients() -> Vec<Patient> {
    let now = Utc::now();
    vec![
        Patient {
            id: "P1001".to_string(),
            national_id: NationalId::parse("1234567890").expect("seed national id is valid"),
            name: "Alice Johnson".to_string(),
            age: 34,
            blood_group: "A+".to_string(),
            allergies: string_set(&["Penicillin", "Dust"]),
            chronic_diseases: string_set(&["Asthma"]),
            implants: BTreeSet::new(),
            abnormalities: BTreeSet::new(),
            address: "Baneshwor, Kathmandu".to_string(),
            phone: "9841000101".to_string(),
            email: Some("alice.johnson@example.com".to_string()),
            fingerprint: Some("FP-ALICE-001".to_string()),
            emergency_contacts: vec![
                EmergencyContact {
                    name: "Ram Johnson".to_string(),
                    relation: "Spouse".to_string(),
                    phone: "9841000102".to_string(),
                    priority: 1,
                },
                EmergencyContact {
                    name: "Sita Karki".to_string(),
                    relation: "Sister".to_string(),
                    phone: "9841000103".to_string(),
                    priority: 2,
                },
            ],
            reports: vec![
                MedicalReport {
                    id: "R100001".to_string(),
                    date: "2024-11-02".to_string(),
                    hospital: "Bir Hospital".to_string(),
                    title: "Annual blood panel".to_string(),
                    description: "Routine CBC and lipid profile.".to_string(),
                    doctor: "Dr. Anita Sharma".to_string(),
                    resource_url: "reports/P1001/cbc-2024.pdf".to_string(),
                    status: ReportStatus::Completed,
                },
                MedicalReport {
                    id: "R100002".to_string(),
                    date: "2025-01-18".to_string(),
                    hospital: "Bir Hospital".to_string(),
                    title: "Pulmonary function test".to_string(),
                    description: "Follow-up spirometry for asthma.".to_string(),
                    doctor: "Dr. Anita Sharma".to_string(),
                    resource_url: "reports/P1001/pft-2025.pdf".to_string(),
                    status: ReportStatus::Pending,
                },
            ],
            hospital: "Bir Hospital".to_string(),
            password: "patient".to_string(),
            updated_at: now,
        },
        Patient {
            id: "P1002".to_string(),
            national_id: NationalId::parse("2345678901").expect("seed national id is valid"),
            name: "Bikash Thapa".to_string(),
            age: 58,
            blood_group: "O-".to_string(),
            allergies: BTreeSet::new(),
            chronic_diseases: string_set(&["Type 2 diabetes", "Hypertension"]),
            implants: string_set(&["Pacemaker"]),
            abnormalities: string_set(&["Left bundle branch block"]),
            address: "Lagankhel, Lalitpur".to_string(),
            phone: "9847000201".to_string(),
            email: None,
            fingerprint: None,
            emergency_contacts: vec![EmergencyContact {
                name: "Maya Thapa".to_string(),
                relation: "Daughter".to_string(),
                phone: "9847000202".to_string(),
                priority: 1,
            }],
            reports: vec![MedicalReport {
                id: "R200001".to_string(),
                date: "2025-03-05".to_string(),
                hospital: "Patan Hospital".to_string(),
                title: "Cardiology review".to_string(),
                description: "Pacemaker interrogation flagged arrhythmia.".to_string(),
                doctor: "Dr. Suresh Maharjan".to_string(),
                resource_url: "reports/P1002/cardio-2025.pdf".to_string(),
                status: ReportStatus::Urgent,
            }],
            hospital: "Patan Hospital".to_string(),
            password: "patient".to_string(),
            updated_at: now,
        },
    ]
}

/// Seed doctor collection.
pub fn seed_doctors() -> Vec<Doctor> {
    let now = Utc::now();
    vec![
        Doctor {
            id: "D001".to_string(),
            name: "Dr. Anita Sharma".to_string(),
            license_number: "NMC-14205".to_string(),
            specialty: "Internal Medicine".to_string(),
            sub_specialty: Some("Pulmonology".to_string()),
            years_experience: 12,
            education: "MBBS, MD (Internal Medicine)".to_string(),
            certifications: string_set(&["ACLS", "Fellowship in Pulmonology"]),
            schedule: WeeklySchedule::clinic_hours("09:00", "16:00"),
            phone: "9841000301".to_string(),
            email: Some("anita.sharma@bir.example.org".to_string()),
            hospital: "Bir Hospital".to_string(),
            password: "doctor".to_string(),
            updated_at: now,
        },
        Doctor {
            id: "D002".to_string(),
            name: "Dr. Suresh Maharjan".to_string(),
            license_number: "NMC-09877".to_string(),
            specialty: "Cardiology".to_string(),
            sub_specialty: None,
            years_experience: 21,
            education: "MBBS, DM (Cardiology)".to_string(),
            certifications: string_set(&["Interventional Cardiology"]),
            schedule: WeeklySchedule {
                saturday: DayAvailability::between("10:00", "13:00"),
                ..WeeklySchedule::clinic_hours("08:00", "14:00")
            },
            phone: "9847000301".to_string(),
            email: None,
            hospital: "Patan Hospital".to_string(),
            password: "doctor".to_string(),
            updated_at: now,
        },
    ]
}

/// Seed admin collection.
pub fn seed_admins() -> Vec<Admin> {
    vec![
        Admin {
            id: "A001".to_string(),
            name: "Gita Adhikari".to_string(),
            hospital: "Bir Hospital".to_string(),
            password: "admin".to_string(),
        },
        Admin {
            id: "A002".to_string(),
            name: "Hari Shrestha".to_string(),
            hospital: "Patan Hospital".to_string(),
            password: "admin".to_string(),
        },
    ]
}
