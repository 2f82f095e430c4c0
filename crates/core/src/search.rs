//! Patient search filters for the doctor and admin portals.

use crate::records::Patient;
use serde::Deserialize;

/// Optional filters combined with AND semantics.
///
/// `name` is a case-insensitive substring match; every other filter is an
/// exact string comparison against the stored field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilters {
    pub name: Option<String>,
    pub national_id: Option<String>,
    pub patient_id: Option<String>,
    pub phone: Option<String>,
    pub blood_group: Option<String>,
    pub hospital: Option<String>,
}

impl SearchFilters {
    /// True when the patient passes every present filter.
    pub fn matches(&self, patient: &Patient) -> bool {
        if let Some(name) = &self.name {
            if !patient.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(nid) = &self.national_id {
            if patient.national_id.as_str() != nid {
                return false;
            }
        }
        if let Some(id) = &self.patient_id {
            if patient.id != *id {
                return false;
            }
        }
        if let Some(phone) = &self.phone {
            if patient.phone != *phone {
                return false;
            }
        }
        if let Some(blood_group) = &self.blood_group {
            if patient.blood_group != *blood_group {
                return false;
            }
        }
        if let Some(hospital) = &self.hospital {
            if patient.hospital != *hospital {
                return false;
            }
        }
        true
    }
}
