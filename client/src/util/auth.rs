//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every guarded route applies the same redirect behavior: the guard decision
//! comes from `session::guard`, and this module turns it into a navigation.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::guard::{self, Access, GuardDecision};
use session::nav::LOGIN_PATH;
use session::{Navigation, Session};

/// Path a guard decision sends the user to, if any.
pub fn redirect_target(decision: GuardDecision) -> Option<&'static str> {
    match decision {
        GuardDecision::RedirectToLogin => Some(LOGIN_PATH),
        GuardDecision::Forbidden { home } => Some(home),
        GuardDecision::Pending | GuardDecision::Allow => None,
    }
}

/// Guard decision for a view that may already be mounted.
///
/// Only the startup load shows the pending indicator. Once a view is
/// allowed, the loading window of a later operation (a profile save, say)
/// keeps it mounted so its local state survives the round trip.
pub fn settled_decision(previous: Option<GuardDecision>, session: &Session, access: Access) -> GuardDecision {
    let next = guard::evaluate(session, access);
    match (previous, next) {
        (Some(GuardDecision::Allow), GuardDecision::Pending) if session.is_hydrated() => GuardDecision::Allow,
        _ => next,
    }
}

/// Redirect whenever the session stops satisfying `access`.
pub fn install_guard_redirect<F>(session: RwSignal<Session>, access: Access, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let decision = guard::evaluate(&session.get(), access);
        if let Some(target) = redirect_target(decision) {
            log::debug!("guard redirect to {target}");
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Perform a navigation returned by a session operation.
pub fn follow<F>(navigation: Option<Navigation>, navigate: &F)
where
    F: Fn(&str, NavigateOptions),
{
    if let Some(navigation) = navigation {
        navigate(navigation.path(), NavigateOptions::default());
    }
}
