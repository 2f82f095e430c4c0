//! # Swasthya Core
//!
//! Core business logic for the Swasthya hospital-records demo.
//!
//! This crate contains the domain store and its access contract:
//! - The three root collections (patients, doctors, admins) with
//!   write-through persistence to versioned JSON snapshots
//! - Credential verification and the in-memory session (auth gate)
//! - The pure role-based route guard
//! - The fixed seed dataset and the emergency critical-data lookup
//!
//! **No API concerns**: HTTP servers, CLI parsing, or presentation belong in
//! the root binary and `swasthya-cli`.

pub mod auth;
pub mod config;
pub mod constants;
pub mod emergency;
pub mod error;
pub mod guard;
pub mod ids;
pub mod records;
pub mod search;
pub mod seed;
pub mod session;
pub mod snapshot;
pub mod store;

pub use auth::AuthGate;
pub use config::CoreConfig;
pub use emergency::{EmergencyQuery, EmergencySummary};
pub use error::{StoreError, StoreResult};
pub use records::{
    Admin, DayAvailability, Doctor, EmergencyContact, MedicalReport, Patient, ReportStatus,
    WeeklySchedule,
};
pub use search::SearchFilters;
pub use session::{Role, Session, SessionUser};
pub use store::DomainStore;

pub use swasthya_types::{EmailAddress, NationalId, NonEmptyText, PhoneNumber, TextError};
