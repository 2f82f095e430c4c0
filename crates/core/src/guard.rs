//! Route guard: a pure decision over (session, required role).
//!
//! Given what a view requires and the current session, the guard either
//! renders or names the login route to redirect to. No caching, no side
//! effects; the session state machine is simply
//! `Anonymous -> Authenticated(role)` on login and back on logout.

use crate::constants::{
    ADMIN_LOGIN_ROUTE, DOCTOR_LOGIN_ROUTE, GENERIC_LOGIN_ROUTE, PATIENT_LOGIN_ROUTE,
};
use crate::session::{Role, Session};

/// What a view requires of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// A session under this exact role.
    Role(Role),
    /// Any authenticated session.
    AnyAuthenticated,
}

/// The guard's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The session satisfies the requirement; render the view.
    Render,
    /// Redirect to the named login route.
    Redirect(&'static str),
}

/// Route to the login screen appropriate for the required role.
fn login_route(requirement: Requirement) -> &'static str {
    match requirement {
        Requirement::Role(Role::Patient) => PATIENT_LOGIN_ROUTE,
        Requirement::Role(Role::Doctor) => DOCTOR_LOGIN_ROUTE,
        Requirement::Role(Role::Admin) => ADMIN_LOGIN_ROUTE,
        Requirement::AnyAuthenticated => GENERIC_LOGIN_ROUTE,
    }
}

/// Decides whether the session may see a view with the given requirement.
pub fn decide(session: Option<&Session>, requirement: Requirement) -> Decision {
    match (session, requirement) {
        (Some(_), Requirement::AnyAuthenticated) => Decision::Render,
        (Some(session), Requirement::Role(role)) if session.role == role => Decision::Render,
        _ => Decision::Redirect(login_route(requirement)),
    }
}
