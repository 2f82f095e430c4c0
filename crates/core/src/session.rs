//! Session and role types.
//!
//! A session is the in-memory record of which user, if any, is currently
//! authenticated and under which role. It lives for the process lifetime
//! only: nothing here is persisted, and restarting the host ends the session.

use crate::records::{Admin, Doctor, Patient};
use serde::{Deserialize, Serialize};

/// The portal role a user authenticates under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// The authenticated user's record, as the session sees it.
///
/// The session holds the full matched record so portal views can render the
/// current user without a second store read, and so a profile update can
/// refresh the session's view in place.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUser {
    Patient(Patient),
    Doctor(Doctor),
    Admin(Admin),
}

impl SessionUser {
    pub fn id(&self) -> &str {
        match self {
            SessionUser::Patient(p) => &p.id,
            SessionUser::Doctor(d) => &d.id,
            SessionUser::Admin(a) => &a.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SessionUser::Patient(p) => &p.name,
            SessionUser::Doctor(d) => &d.name,
            SessionUser::Admin(a) => &a.name,
        }
    }

    pub fn hospital(&self) -> &str {
        match self {
            SessionUser::Patient(p) => &p.hospital,
            SessionUser::Doctor(d) => &d.hospital,
            SessionUser::Admin(a) => &a.hospital,
        }
    }
}

/// An active (user, role) pair. Absence of a `Session` means anonymous.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: SessionUser,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Patient, Role::Doctor, Role::Admin] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn role_rejects_unknown_names() {
        assert!("superuser".parse::<Role>().is_err());
        // Matching is case-sensitive.
        assert!("Patient".parse::<Role>().is_err());
    }

    #[test]
    fn role_serialises_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }
}
