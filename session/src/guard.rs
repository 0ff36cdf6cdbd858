//! Route access rules and the guard that enforces them.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client renders every protected page through a guard component that
//! calls [`evaluate`] against the current session. The guard only reads the
//! session; redirects it asks for are performed by the view layer.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::nav::{self, home_path};
use crate::state::Session;
use crate::user::Role;

/// What a route requires of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Any signed-in role.
    Authenticated,
    Role(Role),
}

/// Outcome of checking a session against an [`Access`] requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session is still loading; render a pending indicator.
    Pending,
    RedirectToLogin,
    /// Signed in with the wrong role. `home` is the user's own landing view.
    Forbidden { home: &'static str },
    Allow,
}

/// Decide whether a view guarded by `access` may render for `session`.
#[must_use]
pub fn evaluate(session: &Session, access: Access) -> GuardDecision {
    if access == Access::Public {
        return GuardDecision::Allow;
    }
    if session.is_loading() {
        return GuardDecision::Pending;
    }
    let Some(role) = session.role() else {
        return GuardDecision::RedirectToLogin;
    };
    match access {
        Access::Role(required) if required != role => GuardDecision::Forbidden { home: home_path(role) },
        _ => GuardDecision::Allow,
    }
}

// =============================================================================
// ROUTE TABLE
// =============================================================================

/// A client route and its access requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteRule {
    /// Path pattern; `:name` segments match any single segment.
    pub pattern: &'static str,
    pub access: Access,
}

pub const INTERNSHIP_DETAILS_PATTERN: &str = "/internships/:id";
pub const MESSAGES_PATH: &str = "/messages";
pub const STUDENT_INTERNSHIPS_PATH: &str = "/student/internships";
pub const STUDENT_APPLICATIONS_PATH: &str = "/student/applications";
pub const COMPANY_NEW_INTERNSHIP_PATH: &str = "/company/internships/new";
pub const COMPANY_INTERNSHIPS_PATH: &str = "/company/internships";
pub const COMPANY_STUDENTS_PATH: &str = "/company/students";

pub const ROUTES: &[RouteRule] = &[
    RouteRule { pattern: nav::LANDING_PATH, access: Access::Public },
    RouteRule { pattern: nav::LOGIN_PATH, access: Access::Public },
    RouteRule { pattern: nav::REGISTER_PATH, access: Access::Public },
    RouteRule { pattern: nav::STUDENT_DASHBOARD_PATH, access: Access::Role(Role::Student) },
    RouteRule { pattern: nav::STUDENT_PROFILE_PATH, access: Access::Role(Role::Student) },
    RouteRule { pattern: STUDENT_INTERNSHIPS_PATH, access: Access::Role(Role::Student) },
    RouteRule { pattern: STUDENT_APPLICATIONS_PATH, access: Access::Role(Role::Student) },
    RouteRule { pattern: nav::COMPANY_DASHBOARD_PATH, access: Access::Role(Role::Company) },
    RouteRule { pattern: nav::COMPANY_PROFILE_PATH, access: Access::Role(Role::Company) },
    RouteRule { pattern: COMPANY_NEW_INTERNSHIP_PATH, access: Access::Role(Role::Company) },
    RouteRule { pattern: COMPANY_INTERNSHIPS_PATH, access: Access::Role(Role::Company) },
    RouteRule { pattern: COMPANY_STUDENTS_PATH, access: Access::Role(Role::Company) },
    RouteRule { pattern: INTERNSHIP_DETAILS_PATTERN, access: Access::Public },
    RouteRule { pattern: MESSAGES_PATH, access: Access::Authenticated },
    RouteRule { pattern: nav::NOT_FOUND_PATH, access: Access::Public },
];

fn pattern_matches(pattern: &str, path: &str) -> bool {
    let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
    let mut want = pattern.split('/');
    let mut got = path.split('/');
    loop {
        match (want.next(), got.next()) {
            (None, None) => return true,
            (Some(w), Some(g)) if w.starts_with(':') && !g.is_empty() => {}
            (Some(w), Some(g)) if w == g => {}
            _ => return false,
        }
    }
}

/// Find the rule for `path`. Unknown paths resolve to the not-found route.
#[must_use]
pub fn resolve(path: &str) -> &'static RouteRule {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    ROUTES
        .iter()
        .find(|rule| pattern_matches(rule.pattern, path))
        .or_else(|| ROUTES.iter().find(|rule| rule.pattern == nav::NOT_FOUND_PATH))
        .unwrap_or(&ROUTES[0])
}

/// Access requirement for `path`.
#[must_use]
pub fn access_for(path: &str) -> Access {
    resolve(path).access
}
