//! Emergency lookup types.
//!
//! Emergency mode resolves a patient from a national ID or a simulated
//! fingerprint sample and returns only the critical subset of the record —
//! the fields a first responder needs, without reports, credentials, or
//! contact details beyond the prioritised emergency contacts.

use crate::records::{EmergencyContact, Patient};
use serde::Serialize;
use std::collections::BTreeSet;
use swasthya_types::NationalId;

/// How the emergency screen identifies a patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmergencyQuery {
    NationalId(NationalId),
    Fingerprint(String),
}

/// The critical-data view of a patient returned by the emergency lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencySummary {
    pub patient_id: String,
    pub name: String,
    pub age: u8,
    pub blood_group: String,
    pub allergies: BTreeSet<String>,
    pub chronic_diseases: BTreeSet<String>,
    pub implants: BTreeSet<String>,
    pub abnormalities: BTreeSet<String>,
    /// Emergency contacts in ascending priority order.
    pub emergency_contacts: Vec<EmergencyContact>,
    pub hospital: String,
}

impl EmergencySummary {
    /// Projects the critical subset out of a full patient record.
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            patient_id: patient.id.clone(),
            name: patient.name.clone(),
            age: patient.age,
            blood_group: patient.blood_group.clone(),
            allergies: patient.allergies.clone(),
            chronic_diseases: patient.chronic_diseases.clone(),
            implants: patient.implants.clone(),
            abnormalities: patient.abnormalities.clone(),
            emergency_contacts: patient
                .contacts_by_priority()
                .into_iter()
                .cloned()
                .collect(),
            hospital: patient.hospital.clone(),
        }
    }
}
