//! The domain store: single source of truth for the three root collections.
//!
//! All reads and writes go through the named operations on [`DomainStore`];
//! the underlying collections are never exposed mutably. Every mutating
//! operation persists the touched collection before returning (write-through).
//! If the persist fails, the in-memory change is rolled back and the error is
//! returned, so memory and disk never silently diverge.
//!
//! Update and delete by an unknown id are deliberate silent no-ops — the
//! portals treat "nothing matched" as acceptable, not as an error. Adds are
//! stricter: duplicate record ids and duplicate patient national IDs are
//! rejected.

use crate::config::CoreConfig;
use crate::emergency::{EmergencyQuery, EmergencySummary};
use crate::error::{StoreError, StoreResult};
use crate::records::{Admin, Doctor, Patient};
use crate::search::SearchFilters;
use crate::seed;
use crate::snapshot;
use std::fs;
use std::sync::Arc;

/// Owns the patient, doctor, and admin collections and their persistence.
#[derive(Debug)]
pub struct DomainStore {
    cfg: Arc<CoreConfig>,
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    admins: Vec<Admin>,
}

impl DomainStore {
    /// Opens the store: loads persisted snapshots, seeding any collection
    /// that has no snapshot yet.
    ///
    /// First run therefore writes the seed dataset to disk before returning,
    /// so a reload sees the same data the process saw.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store directory cannot be created, a
    /// snapshot is unreadable or malformed, or the initial seed persist fails.
    pub fn initialise(cfg: Arc<CoreConfig>) -> StoreResult<Self> {
        fs::create_dir_all(cfg.store_dir()).map_err(StoreError::StoreDirCreation)?;

        let patients = match snapshot::load(&cfg.patients_snapshot_path())? {
            Some(patients) => patients,
            None => {
                tracing::info!("no patient snapshot found, writing seed dataset");
                let patients = seed::seed_patients();
                snapshot::persist(&cfg.patients_snapshot_path(), &patients)?;
                patients
            }
        };

        let doctors = match snapshot::load(&cfg.doctors_snapshot_path())? {
            Some(doctors) => doctors,
            None => {
                tracing::info!("no doctor snapshot found, writing seed dataset");
                let doctors = seed::seed_doctors();
                snapshot::persist(&cfg.doctors_snapshot_path(), &doctors)?;
                doctors
            }
        };

        let admins = match snapshot::load(&cfg.admins_snapshot_path())? {
            Some(admins) => admins,
            None => {
                tracing::info!("no admin snapshot found, writing seed dataset");
                let admins = seed::seed_admins();
                snapshot::persist(&cfg.admins_snapshot_path(), &admins)?;
                admins
            }
        };

        Ok(Self {
            cfg,
            patients,
            doctors,
            admins,
        })
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn admins(&self) -> &[Admin] {
        &self.admins
    }

    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn patient_by_national_id(&self, national_id: &str) -> Option<&Patient> {
        self.patients
            .iter()
            .find(|p| p.national_id.as_str() == national_id)
    }

    pub fn doctor(&self, id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn admin(&self, id: &str) -> Option<&Admin> {
        self.admins.iter().find(|a| a.id == id)
    }

    /// Patients assigned to the given hospital (string equality partition).
    pub fn patients_at<'a>(&'a self, hospital: &str) -> Vec<&'a Patient> {
        self.patients
            .iter()
            .filter(|p| p.hospital == hospital)
            .collect()
    }

    /// Doctors assigned to the given hospital.
    pub fn doctors_at<'a>(&'a self, hospital: &str) -> Vec<&'a Doctor> {
        self.doctors
            .iter()
            .filter(|d| d.hospital == hospital)
            .collect()
    }

    /// Patients passing every filter, in collection order.
    pub fn search_patients<'a>(&'a self, filters: &SearchFilters) -> Vec<&'a Patient> {
        self.patients
            .iter()
            .filter(|p| filters.matches(p))
            .collect()
    }

    /// Resolves the critical-data view for the emergency screen.
    pub fn emergency_lookup(&self, query: &EmergencyQuery) -> Option<EmergencySummary> {
        let patient = match query {
            EmergencyQuery::NationalId(nid) => self.patient_by_national_id(nid.as_str()),
            EmergencyQuery::Fingerprint(sample) => self
                .patients
                .iter()
                .find(|p| p.fingerprint.as_deref() == Some(sample.as_str())),
        }?;
        Some(EmergencySummary::from_patient(patient))
    }

    // ------------------------------------------------------------------
    // Write side (write-through)
    // ------------------------------------------------------------------

    /// Appends a new patient record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateId` / `StoreError::DuplicateNationalId`
    /// when the identifiers are already taken, a validation error from
    /// [`Patient::validate`], or a persistence error (in which case the
    /// record is not added).
    pub fn add_patient(&mut self, patient: Patient) -> StoreResult<()> {
        patient.validate()?;
        if self.patient(&patient.id).is_some() {
            return Err(StoreError::DuplicateId(patient.id));
        }
        if self
            .patient_by_national_id(patient.national_id.as_str())
            .is_some()
        {
            return Err(StoreError::DuplicateNationalId(
                patient.national_id.as_str().to_string(),
            ));
        }

        self.patients.push(patient);
        self.persist_patients_or_rollback(|patients| {
            patients.pop();
        })
    }

    /// Replaces the patient whose id matches `patient.id`.
    ///
    /// Returns `Ok(false)` without touching disk when no record matches.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateNationalId` if the new national ID
    /// belongs to a different record, a validation error, or a persistence
    /// error (in which case the previous record is restored).
    pub fn update_patient(&mut self, patient: Patient) -> StoreResult<bool> {
        patient.validate()?;
        let Some(index) = self.patients.iter().position(|p| p.id == patient.id) else {
            return Ok(false);
        };
        if self
            .patients
            .iter()
            .any(|p| p.id != patient.id && p.national_id == patient.national_id)
        {
            return Err(StoreError::DuplicateNationalId(
                patient.national_id.as_str().to_string(),
            ));
        }

        let previous = std::mem::replace(&mut self.patients[index], patient);
        self.persist_patients_or_rollback(move |patients| {
            patients[index] = previous;
        })?;
        Ok(true)
    }

    /// Removes the patient with the given id. No-op if absent.
    ///
    /// Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns a persistence error, in which case the record is restored.
    pub fn delete_patient(&mut self, id: &str) -> StoreResult<bool> {
        let Some(index) = self.patients.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        let removed = self.patients.remove(index);
        self.persist_patients_or_rollback(move |patients| {
            patients.insert(index, removed);
        })?;
        Ok(true)
    }

    /// Appends a new doctor record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateId` when the id is taken, a validation
    /// error from [`Doctor::validate`], or a persistence error (in which case
    /// the record is not added).
    pub fn add_doctor(&mut self, doctor: Doctor) -> StoreResult<()> {
        doctor.validate()?;
        if self.doctor(&doctor.id).is_some() {
            return Err(StoreError::DuplicateId(doctor.id));
        }

        self.doctors.push(doctor);
        self.persist_doctors_or_rollback(|doctors| {
            doctors.pop();
        })
    }

    /// Replaces the doctor whose id matches `doctor.id`.
    ///
    /// Returns `Ok(false)` without touching disk when no record matches.
    pub fn update_doctor(&mut self, doctor: Doctor) -> StoreResult<bool> {
        doctor.validate()?;
        let Some(index) = self.doctors.iter().position(|d| d.id == doctor.id) else {
            return Ok(false);
        };

        let previous = std::mem::replace(&mut self.doctors[index], doctor);
        self.persist_doctors_or_rollback(move |doctors| {
            doctors[index] = previous;
        })?;
        Ok(true)
    }

    /// Removes the doctor with the given id. No-op if absent.
    pub fn delete_doctor(&mut self, id: &str) -> StoreResult<bool> {
        let Some(index) = self.doctors.iter().position(|d| d.id == id) else {
            return Ok(false);
        };

        let removed = self.doctors.remove(index);
        self.persist_doctors_or_rollback(move |doctors| {
            doctors.insert(index, removed);
        })?;
        Ok(true)
    }

    fn persist_patients_or_rollback(
        &mut self,
        rollback: impl FnOnce(&mut Vec<Patient>),
    ) -> StoreResult<()> {
        match snapshot::persist(&self.cfg.patients_snapshot_path(), &self.patients) {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::warn!("patient snapshot persist failed, rolling back: {e}");
                rollback(&mut self.patients);
                Err(e)
            }
        }
    }

    fn persist_doctors_or_rollback(
        &mut self,
        rollback: impl FnOnce(&mut Vec<Doctor>),
    ) -> StoreResult<()> {
        match snapshot::persist(&self.cfg.doctors_snapshot_path(), &self.doctors) {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::warn!("doctor snapshot persist failed, rolling back: {e}");
                rollback(&mut self.doctors);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{EmergencyContact, WeeklySchedule};
    use chrono::Utc;
    use std::collections::BTreeSet;
    use std::path::Path;
    use swasthya_types::NationalId;
    use tempfile::TempDir;

    fn test_cfg(data_dir: &Path) -> Arc<CoreConfig> {
        Arc::new(
            CoreConfig::new(data_dir.to_path_buf(), "swasthya.test".to_string())
                .expect("CoreConfig::new should succeed"),
        )
    }

    fn open_store(dir: &TempDir) -> DomainStore {
        DomainStore::initialise(test_cfg(dir.path())).expect("initialise should succeed")
    }

    fn new_patient(id: &str, nid: &str) -> Patient {
        Patient {
            id: id.to_string(),
            national_id: NationalId::parse(nid).unwrap(),
            name: "New Patient".to_string(),
            age: 40,
            blood_group: "B+".to_string(),
            allergies: BTreeSet::new(),
            chronic_diseases: BTreeSet::new(),
            implants: BTreeSet::new(),
            abnormalities: BTreeSet::new(),
            address: "Pokhara".to_string(),
            phone: "9846000001".to_string(),
            email: None,
            fingerprint: None,
            emergency_contacts: vec![],
            reports: vec![],
            hospital: "Bir Hospital".to_string(),
            password: "patient".to_string(),
            updated_at: Utc::now(),
        }
    }

    fn new_doctor(id: &str) -> Doctor {
        Doctor {
            id: id.to_string(),
            name: "Dr. New".to_string(),
            license_number: "NMC-00001".to_string(),
            specialty: "General".to_string(),
            sub_specialty: None,
            years_experience: 3,
            education: "MBBS".to_string(),
            certifications: BTreeSet::new(),
            schedule: WeeklySchedule::closed(),
            phone: "9846000002".to_string(),
            email: None,
            hospital: "Patan Hospital".to_string(),
            password: "doctor".to_string(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn first_run_seeds_and_persists() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = open_store(&dir);

        assert!(!store.patients().is_empty());
        assert!(!store.doctors().is_empty());
        assert!(!store.admins().is_empty());

        let cfg = test_cfg(dir.path());
        assert!(cfg.patients_snapshot_path().is_file());
        assert!(cfg.doctors_snapshot_path().is_file());
        assert!(cfg.admins_snapshot_path().is_file());
    }

    #[test]
    fn reload_reflects_persisted_state() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        {
            let mut store = open_store(&dir);
            store
                .add_patient(new_patient("P9001", "5551112223"))
                .expect("add should succeed");
        }

        let reloaded = open_store(&dir);
        let found = reloaded.patient("P9001").expect("patient should survive reload");
        assert_eq!(found.national_id.as_str(), "5551112223");
    }

    #[test]
    fn added_patient_is_retrievable_and_in_snapshot() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&dir);

        store
            .add_patient(new_patient("P9001", "5551112223"))
            .expect("add should succeed");
        assert!(store.patient("P9001").is_some());

        let raw = std::fs::read_to_string(test_cfg(dir.path()).patients_snapshot_path()).unwrap();
        assert!(raw.contains("P9001"));
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&dir);

        store
            .add_patient(new_patient("P9001", "5551112223"))
            .expect("first add should succeed");
        let err = store
            .add_patient(new_patient("P9001", "5551112224"))
            .expect_err("duplicate id should fail");
        assert!(matches!(err, StoreError::DuplicateId(id) if id == "P9001"));
    }

    #[test]
    fn add_rejects_duplicate_national_id() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&dir);

        let err = store
            .add_patient(new_patient("P9001", "1234567890"))
            .expect_err("seed national id should collide");
        assert!(matches!(err, StoreError::DuplicateNationalId(_)));
    }

    #[test]
    fn update_replaces_record_exactly_and_isolates_others() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&dir);

        let others_before: Vec<Patient> = store
            .patients()
            .iter()
            .filter(|p| p.id != "P1001")
            .cloned()
            .collect();

        let mut updated = store.patient("P1001").unwrap().clone();
        updated.age = 35;
        updated.allergies.insert("Latex".to_string());
        let replaced = store
            .update_patient(updated.clone())
            .expect("update should succeed");
        assert!(replaced);

        assert_eq!(store.patient("P1001"), Some(&updated));

        let others_after: Vec<Patient> = store
            .patients()
            .iter()
            .filter(|p| p.id != "P1001")
            .cloned()
            .collect();
        assert_eq!(others_before, others_after);
    }

    #[test]
    fn update_of_unknown_id_is_silent_noop() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&dir);

        let before = store.patients().to_vec();
        let replaced = store
            .update_patient(new_patient("P0000", "5550000000"))
            .expect("no-op update should not error");
        assert!(!replaced);
        assert_eq!(store.patients(), &before[..]);
    }

    #[test]
    fn two_sequential_updates_are_last_write_wins() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&dir);

        let mut first = store.patient("P1001").unwrap().clone();
        first.address = "First Street".to_string();
        first.age = 40;
        store.update_patient(first).expect("first update");

        let mut second = store.patient("P1001").unwrap().clone();
        second.address = "Second Street".to_string();
        second.age = 41;
        store
            .update_patient(second.clone())
            .expect("second update");

        let current = store.patient("P1001").unwrap();
        assert_eq!(current.address, "Second Street");
        assert_eq!(current.age, 41);
        assert_eq!(current, &second);
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&dir);

        let len_before = store.patients().len();
        assert!(store.delete_patient("P1002").expect("delete should succeed"));
        assert_eq!(store.patients().len(), len_before - 1);
        assert!(store.patient("P1002").is_none());

        assert!(!store.delete_patient("P1002").expect("second delete is a no-op"));
        assert_eq!(store.patients().len(), len_before - 1);
    }

    #[test]
    fn add_then_delete_leaves_no_residue() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&dir);

        let before = store.patients().to_vec();
        store
            .add_patient(new_patient("P9999", "5559998887"))
            .expect("add should succeed");
        store
            .delete_patient("P9999")
            .expect("delete should succeed");

        assert_eq!(store.patients(), &before[..]);
    }

    #[test]
    fn doctor_crud_mirrors_patient_behaviour() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&dir);

        store.add_doctor(new_doctor("D900")).expect("add");
        let err = store
            .add_doctor(new_doctor("D900"))
            .expect_err("duplicate doctor id should fail");
        assert!(matches!(err, StoreError::DuplicateId(_)));

        let mut updated = store.doctor("D900").unwrap().clone();
        updated.specialty = "Neurology".to_string();
        assert!(store.update_doctor(updated.clone()).expect("update"));
        assert_eq!(store.doctor("D900"), Some(&updated));

        assert!(store.delete_doctor("D900").expect("delete"));
        assert!(!store.delete_doctor("D900").expect("idempotent delete"));
    }

    #[test]
    fn hospital_partition_views_are_disjoint() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = open_store(&dir);

        let bir = store.patients_at("Bir Hospital");
        let patan = store.patients_at("Patan Hospital");
        assert!(bir.iter().all(|p| p.hospital == "Bir Hospital"));
        assert!(patan.iter().all(|p| p.hospital == "Patan Hospital"));
        assert_eq!(bir.len() + patan.len(), store.patients().len());

        let bir_doctors = store.doctors_at("Bir Hospital");
        let patan_doctors = store.doctors_at("Patan Hospital");
        assert!(bir_doctors.iter().all(|d| d.hospital == "Bir Hospital"));
        assert_eq!(
            bir_doctors.len() + patan_doctors.len(),
            store.doctors().len()
        );
    }

    #[test]
    fn emergency_lookup_by_national_id_and_fingerprint() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = open_store(&dir);

        let by_nid = store
            .emergency_lookup(&EmergencyQuery::NationalId(
                NationalId::parse("1234567890").unwrap(),
            ))
            .expect("seed patient should be found");
        assert_eq!(by_nid.name, "Alice Johnson");

        let by_fp = store
            .emergency_lookup(&EmergencyQuery::Fingerprint("FP-ALICE-001".to_string()))
            .expect("fingerprint sample should match");
        assert_eq!(by_fp.patient_id, by_nid.patient_id);

        assert!(store
            .emergency_lookup(&EmergencyQuery::Fingerprint("FP-NOBODY".to_string()))
            .is_none());
    }

    #[test]
    fn legacy_bare_array_snapshot_is_accepted() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(dir.path());
        std::fs::create_dir_all(cfg.store_dir()).unwrap();

        let legacy = serde_json::to_string(&seed::seed_patients()).unwrap();
        std::fs::write(cfg.patients_snapshot_path(), legacy).unwrap();

        let store = DomainStore::initialise(cfg).expect("initialise should succeed");
        assert!(store.patient("P1001").is_some());
    }

    #[test]
    fn search_delegates_to_filters() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = open_store(&dir);

        let filters = SearchFilters {
            hospital: Some("Patan Hospital".to_string()),
            ..Default::default()
        };
        let hits = store.search_patients(&filters);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|p| p.hospital == "Patan Hospital"));
    }

    #[test]
    fn contact_cap_is_enforced_on_add() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&dir);

        let mut patient = new_patient("P9001", "5551112223");
        patient.emergency_contacts = (0..4)
            .map(|i| EmergencyContact {
                name: format!("C{i}"),
                relation: "Friend".to_string(),
                phone: "9841999999".to_string(),
                priority: i as u8 + 1,
            })
            .collect();
        let err = store
            .add_patient(patient)
            .expect_err("contact cap should be enforced");
        assert!(matches!(err, StoreError::TooManyEmergencyContacts { .. }));
    }
}
