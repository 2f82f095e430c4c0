//! Constants used throughout the Swasthya core crate.
//!
//! This module contains all path, filename, and limit constants to ensure
//! consistency across the codebase and make maintenance easier.

/// Default directory for store data when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "swasthya_data";

/// Default store namespace, used as the snapshot subdirectory name.
///
/// Namespacing keeps Swasthya snapshots apart from any other application's
/// data in a shared data directory.
pub const DEFAULT_NAMESPACE: &str = "swasthya.dev.1";

/// Filename for the persisted patient collection.
pub const PATIENTS_SNAPSHOT_FILENAME: &str = "patients.json";

/// Filename for the persisted doctor collection.
pub const DOCTORS_SNAPSHOT_FILENAME: &str = "doctors.json";

/// Filename for the persisted admin collection.
pub const ADMINS_SNAPSHOT_FILENAME: &str = "admins.json";

/// Current snapshot envelope version. Bump when the record shape changes
/// and add a migration arm in `snapshot::load`.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Maximum number of prioritised emergency contacts per patient.
pub const MAX_EMERGENCY_CONTACTS: usize = 3;

/// Login route for the patient portal.
pub const PATIENT_LOGIN_ROUTE: &str = "/login/patient";

/// Login route for the doctor portal.
pub const DOCTOR_LOGIN_ROUTE: &str = "/login/doctor";

/// Login route for the hospital admin portal.
pub const ADMIN_LOGIN_ROUTE: &str = "/login/admin";

/// Generic login route used when any authenticated role would do.
pub const GENERIC_LOGIN_ROUTE: &str = "/login";
