use super::*;
use crate::nav::Navigation;
use crate::user::UserRecord;

fn anonymous() -> Session {
    let mut session = Session::default();
    session.hydrate(None, None);
    session
}

fn signed_in(role: Role) -> Session {
    let mut session = Session::default();
    session.hydrate(Some(UserRecord::new("a@b.com", "a", role)), None);
    session
}

// =============================================================================
// evaluate
// =============================================================================

#[test]
fn public_routes_always_allowed() {
    assert_eq!(evaluate(&Session::default(), Access::Public), GuardDecision::Allow);
    assert_eq!(evaluate(&anonymous(), Access::Public), GuardDecision::Allow);
}

#[test]
fn loading_session_is_pending() {
    assert_eq!(evaluate(&Session::default(), Access::Authenticated), GuardDecision::Pending);
    assert_eq!(evaluate(&Session::default(), Access::Role(Role::Student)), GuardDecision::Pending);
}

#[test]
fn anonymous_redirects_to_login() {
    assert_eq!(evaluate(&anonymous(), Access::Authenticated), GuardDecision::RedirectToLogin);
    assert_eq!(evaluate(&anonymous(), Access::Role(Role::Company)), GuardDecision::RedirectToLogin);
}

#[test]
fn matching_role_allowed() {
    assert_eq!(evaluate(&signed_in(Role::Student), Access::Role(Role::Student)), GuardDecision::Allow);
    assert_eq!(evaluate(&signed_in(Role::Company), Access::Authenticated), GuardDecision::Allow);
}

#[test]
fn role_mismatch_forbidden_with_own_home() {
    assert_eq!(
        evaluate(&signed_in(Role::Student), Access::Role(Role::Company)),
        GuardDecision::Forbidden { home: nav::STUDENT_DASHBOARD_PATH }
    );
    assert_eq!(
        evaluate(&signed_in(Role::Company), Access::Role(Role::Student)),
        GuardDecision::Forbidden { home: nav::COMPANY_DASHBOARD_PATH }
    );
}

#[test]
fn admin_bounced_to_landing() {
    assert_eq!(
        evaluate(&signed_in(Role::Admin), Access::Role(Role::Student)),
        GuardDecision::Forbidden { home: nav::LANDING_PATH }
    );
}

#[test]
fn evaluate_does_not_mutate() {
    let session = signed_in(Role::Student);
    let before = session.clone();
    let _ = evaluate(&session, Access::Role(Role::Company));
    assert_eq!(session, before);
}

// =============================================================================
// route table
// =============================================================================

#[test]
fn resolve_static_routes() {
    assert_eq!(access_for("/"), Access::Public);
    assert_eq!(access_for("/login"), Access::Public);
    assert_eq!(access_for("/student/dashboard"), Access::Role(Role::Student));
    assert_eq!(access_for("/company/internships/new"), Access::Role(Role::Company));
    assert_eq!(access_for("/company/internships"), Access::Role(Role::Company));
    assert_eq!(access_for("/messages"), Access::Authenticated);
}

#[test]
fn resolve_param_route() {
    assert_eq!(resolve("/internships/42").pattern, INTERNSHIP_DETAILS_PATTERN);
    assert_eq!(access_for("/internships/42"), Access::Public);
}

#[test]
fn resolve_ignores_query_and_trailing_slash() {
    assert_eq!(resolve("/student/profile/").pattern, nav::STUDENT_PROFILE_PATH);
    assert_eq!(resolve("/messages?thread=3").pattern, MESSAGES_PATH);
}

#[test]
fn resolve_unknown_is_not_found() {
    assert_eq!(resolve("/nope").pattern, nav::NOT_FOUND_PATH);
    assert_eq!(resolve("/internships").pattern, nav::NOT_FOUND_PATH);
    assert_eq!(resolve("/internships/1/extra").pattern, nav::NOT_FOUND_PATH);
}

#[test]
fn navigation_targets_are_routed() {
    for role in [Role::Student, Role::Company] {
        assert_eq!(access_for(Navigation::Dashboard(role).path()), Access::Role(role));
        assert_eq!(access_for(Navigation::ProfileSetup(role).path()), Access::Role(role));
    }
    assert_eq!(access_for(Navigation::Landing.path()), Access::Public);
}
