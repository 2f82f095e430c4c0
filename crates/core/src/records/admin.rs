//! Hospital admin record type.
//!
//! Admins form a static roster: seeded on first run, never created or edited
//! through the portals. One admin manages exactly one hospital's patient and
//! doctor rosters, partitioned by hospital name equality.

use serde::{Deserialize, Serialize};

/// A hospital administrator record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    /// Record id, unique across the admin collection (e.g. `A001`).
    pub id: String,
    pub name: String,
    /// The single hospital this admin manages.
    pub hospital: String,
    /// Login credential, compared exactly as stored.
    pub password: String,
}
