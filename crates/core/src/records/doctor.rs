//! Doctor record types, including the weekly availability schedule.

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Availability for a single day of the week.
///
/// Times are kept as `HH:MM` strings; the schedule is display data, not a
/// booking engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub start: String,
    pub end: String,
    pub available: bool,
}

impl DayAvailability {
    /// An unavailable day with empty times.
    pub fn off() -> Self {
        Self {
            start: String::new(),
            end: String::new(),
            available: false,
        }
    }

    /// An available day covering the given times.
    pub fn between(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
            available: true,
        }
    }
}

/// One availability entry per day of the week, Sunday first (Nepali working
/// week runs Sunday to Friday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub sunday: DayAvailability,
    pub monday: DayAvailability,
    pub tuesday: DayAvailability,
    pub wednesday: DayAvailability,
    pub thursday: DayAvailability,
    pub friday: DayAvailability,
    pub saturday: DayAvailability,
}

impl WeeklySchedule {
    /// A schedule with every day off.
    pub fn closed() -> Self {
        Self {
            sunday: DayAvailability::off(),
            monday: DayAvailability::off(),
            tuesday: DayAvailability::off(),
            wednesday: DayAvailability::off(),
            thursday: DayAvailability::off(),
            friday: DayAvailability::off(),
            saturday: DayAvailability::off(),
        }
    }

    /// Sunday-to-Friday clinic hours with Saturday off.
    pub fn clinic_hours(start: &str, end: &str) -> Self {
        Self {
            sunday: DayAvailability::between(start, end),
            monday: DayAvailability::between(start, end),
            tuesday: DayAvailability::between(start, end),
            wednesday: DayAvailability::between(start, end),
            thursday: DayAvailability::between(start, end),
            friday: DayAvailability::between(start, end),
            saturday: DayAvailability::off(),
        }
    }
}

/// A complete doctor record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// Record id, unique across the doctor collection (e.g. `D001`).
    pub id: String,
    pub name: String,
    /// Medical council licence number.
    pub license_number: String,
    pub specialty: String,
    #[serde(default)]
    pub sub_specialty: Option<String>,
    pub years_experience: u8,
    pub education: String,
    pub certifications: BTreeSet<String>,
    pub schedule: WeeklySchedule,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Assigned hospital (string-equality partition, no hospital entity).
    pub hospital: String,
    /// Login credential, compared exactly as stored.
    pub password: String,
    pub updated_at: DateTime<Utc>,
}

impl Doctor {
    /// Checks the record's internal constraints before it enters the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidInput` when the id or name is blank.
    pub fn validate(&self) -> StoreResult<()> {
        if self.id.trim().is_empty() {
            return Err(StoreError::InvalidInput("doctor id cannot be empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "doctor name cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// Refreshes the last-modified timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
