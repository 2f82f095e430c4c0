//! Patient record types.
//!
//! A patient is the central record of the store: identity and demographics,
//! the medical-fact sets the emergency screen surfaces, contact details,
//! prioritised emergency contacts, and an ordered sequence of medical reports.
//! Records are replaced whole on update; the only derived field is
//! `updated_at`, which callers refresh through [`Patient::touch`].

use crate::constants::MAX_EMERGENCY_CONTACTS;
use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use swasthya_types::NationalId;

/// Status of a medical report as tracked by the portals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Completed,
    Urgent,
}

/// A single entry in a patient's ordered report sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalReport {
    /// Report identifier, unique within the owning patient.
    pub id: String,
    /// Report date as an ISO `YYYY-MM-DD` string.
    pub date: String,
    /// Hospital where the report was produced.
    pub hospital: String,
    pub title: String,
    pub description: String,
    /// Name of the doctor the report is attributed to.
    pub doctor: String,
    /// Locator for the external report resource (scan, PDF, lab system URL).
    pub resource_url: String,
    pub status: ReportStatus,
}

/// A prioritised emergency contact.
///
/// `priority` is a small positive integer used only for display order;
/// uniqueness across a patient's contacts is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub relation: String,
    pub phone: String,
    pub priority: u8,
}

/// A complete patient record.
///
/// This is the literal persisted shape: the snapshot file holds a list of
/// these records inside the version envelope, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Record id, unique across the patient collection (e.g. `P1042`).
    pub id: String,
    /// Ten-digit national identity number, unique across the collection.
    pub national_id: NationalId,
    pub name: String,
    pub age: u8,
    pub blood_group: String,
    pub allergies: BTreeSet<String>,
    pub chronic_diseases: BTreeSet<String>,
    pub implants: BTreeSet<String>,
    pub abnormalities: BTreeSet<String>,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Simulated fingerprint sample used by the emergency lookup.
    #[serde(default)]
    pub fingerprint: Option<String>,
    pub emergency_contacts: Vec<EmergencyContact>,
    pub reports: Vec<MedicalReport>,
    /// Assigned home hospital (string-equality partition, no hospital entity).
    pub hospital: String,
    /// Login credential, compared exactly as stored.
    pub password: String,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    /// Checks the record's internal constraints before it enters the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TooManyEmergencyContacts` when the contact list
    /// exceeds [`MAX_EMERGENCY_CONTACTS`], or `StoreError::InvalidInput` when
    /// the id or name is blank.
    pub fn validate(&self) -> StoreResult<()> {
        if self.id.trim().is_empty() {
            return Err(StoreError::InvalidInput("patient id cannot be empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "patient name cannot be empty".into(),
            ));
        }
        if self.emergency_contacts.len() > MAX_EMERGENCY_CONTACTS {
            return Err(StoreError::TooManyEmergencyContacts {
                max: MAX_EMERGENCY_CONTACTS,
            });
        }
        Ok(())
    }

    /// Refreshes the last-modified timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Emergency contacts sorted by ascending priority for display.
    ///
    /// Ties keep their stored order; priority is display order only.
    pub fn contacts_by_priority(&self) -> Vec<&EmergencyContact> {
        let mut contacts: Vec<&EmergencyContact> = self.emergency_contacts.iter().collect();
        contacts.sort_by_key(|c| c.priority);
        contacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_patient(id: &str, nid: &str) -> Patient {
        Patient {
            id: id.to_string(),
            national_id: NationalId::parse(nid).unwrap(),
            name: "Test Patient".to_string(),
            age: 30,
            blood_group: "O+".to_string(),
            allergies: BTreeSet::new(),
            chronic_diseases: BTreeSet::new(),
            implants: BTreeSet::new(),
            abnormalities: BTreeSet::new(),
            address: "Kathmandu".to_string(),
            phone: "9841000000".to_string(),
            email: None,
            fingerprint: None,
            emergency_contacts: vec![],
            reports: vec![],
            hospital: "Bir Hospital".to_string(),
            password: "secret".to_string(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn validate_accepts_sample() {
        sample_patient("P1000", "1111111111")
            .validate()
            .expect("sample should validate");
    }

    #[test]
    fn validate_rejects_blank_id() {
        let mut p = sample_patient("P1000", "1111111111");
        p.id = "  ".to_string();
        let err = p.validate().expect_err("blank id should fail");
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[test]
    fn validate_caps_emergency_contacts() {
        let mut p = sample_patient("P1000", "1111111111");
        p.emergency_contacts = (0..4)
            .map(|i| EmergencyContact {
                name: format!("Contact {i}"),
                relation: "Sibling".to_string(),
                phone: "9841111111".to_string(),
                priority: i as u8 + 1,
            })
            .collect();
        let err = p.validate().expect_err("four contacts should fail");
        assert!(matches!(
            err,
            StoreError::TooManyEmergencyContacts { max: 3 }
        ));
    }

    #[test]
    fn contacts_sort_by_priority_for_display() {
        let mut p = sample_patient("P1000", "1111111111");
        p.emergency_contacts = vec![
            EmergencyContact {
                name: "Second".to_string(),
                relation: "Friend".to_string(),
                phone: "9841000002".to_string(),
                priority: 2,
            },
            EmergencyContact {
                name: "First".to_string(),
                relation: "Spouse".to_string(),
                phone: "9841000001".to_string(),
                priority: 1,
            },
        ];
        let ordered = p.contacts_by_priority();
        assert_eq!(ordered[0].name, "First");
        assert_eq!(ordered[1].name, "Second");
    }

    #[test]
    fn report_status_serialises_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::Urgent).unwrap(),
            "\"urgent\""
        );
        let parsed: ReportStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, ReportStatus::Pending);
    }
}
