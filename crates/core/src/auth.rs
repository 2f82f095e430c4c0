//! Credential verification and session lifecycle.
//!
//! The gate performs an exact, case-sensitive comparison of the supplied
//! password against the stored credential — that is the behavioural contract
//! the portals rely on. Success and failure are the only outcomes surfaced;
//! "no such user" and "wrong password" are indistinguishable to the caller.
//! The comparison is centralised here so a move to hashed credentials stays
//! a one-site change.

use crate::error::{StoreError, StoreResult};
use crate::records::Patient;
use crate::session::{Role, Session, SessionUser};
use crate::store::DomainStore;

/// Holds the at-most-one active session and performs logins against a store.
#[derive(Debug, Default)]
pub struct AuthGate {
    session: Option<Session>,
}

impl AuthGate {
    /// Creates a gate with no active session (anonymous).
    pub fn new() -> Self {
        Self::default()
    }

    /// The current session, if any.
    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Attempts to authenticate under the given role.
    ///
    /// Patients are matched by national ID; doctors and admins by record id.
    /// On success the session becomes the matched record and role. On failure
    /// the existing session is left unchanged and no detail about the cause
    /// is returned.
    pub fn login(
        &mut self,
        store: &DomainStore,
        identifier: &str,
        password: &str,
        role: Role,
    ) -> bool {
        let user = match role {
            Role::Patient => store
                .patient_by_national_id(identifier)
                .filter(|p| p.password == password)
                .map(|p| SessionUser::Patient(p.clone())),
            Role::Doctor => store
                .doctor(identifier)
                .filter(|d| d.password == password)
                .map(|d| SessionUser::Doctor(d.clone())),
            Role::Admin => store
                .admin(identifier)
                .filter(|a| a.password == password)
                .map(|a| SessionUser::Admin(a.clone())),
        };

        match user {
            Some(user) => {
                tracing::info!(role = %role, id = user.id(), "login succeeded");
                self.session = Some(Session { user, role });
                true
            }
            None => {
                tracing::info!(role = %role, "login failed");
                false
            }
        }
    }

    /// Clears the session unconditionally.
    pub fn logout(&mut self) {
        self.session = None;
    }

    /// Writes a logged-in patient's own profile and refreshes the session's
    /// view of the current user, keeping both consistent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoActiveSession` when anonymous,
    /// `StoreError::RoleMismatch` when the session is not a patient session,
    /// `StoreError::InvalidInput` when the record id is not the current
    /// user's or when the current user's record no longer exists in the
    /// store, plus any store error from the underlying update.
    pub fn update_current_profile(
        &mut self,
        store: &mut DomainStore,
        patient: Patient,
    ) -> StoreResult<()> {
        let session = self.session.as_mut().ok_or(StoreError::NoActiveSession)?;
        let SessionUser::Patient(current) = &session.user else {
            return Err(StoreError::RoleMismatch {
                required: Role::Patient,
            });
        };
        if current.id != patient.id {
            return Err(StoreError::InvalidInput(
                "profile update must target the current user".into(),
            ));
        }

        // If the record was removed mid-session nothing is written; the
        // session must not be refreshed with a record the store never held.
        let replaced = store.update_patient(patient.clone())?;
        if !replaced {
            return Err(StoreError::InvalidInput(
                "current user no longer exists in the store".into(),
            ));
        }
        session.user = SessionUser::Patient(patient);
        Ok(())
    }
}
