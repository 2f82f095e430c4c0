//! Domain record types: the three root collections of the store.

pub mod admin;
pub mod doctor;
pub mod patient;

pub use admin::Admin;
pub use doctor::{DayAvailability, Doctor, WeeklySchedule};
pub use patient::{EmergencyContact, MedicalReport, Patient, ReportStatus};
