//! Navigation targets emitted by session transitions.

use crate::user::Role;

pub const LANDING_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const NOT_FOUND_PATH: &str = "/404";

pub const STUDENT_DASHBOARD_PATH: &str = "/student/dashboard";
pub const STUDENT_PROFILE_PATH: &str = "/student/profile";
pub const COMPANY_DASHBOARD_PATH: &str = "/company/dashboard";
pub const COMPANY_PROFILE_PATH: &str = "/company/profile";

/// Where the view layer should go after a session transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Dashboard(Role),
    ProfileSetup(Role),
    Landing,
}

impl Navigation {
    /// Navigation after a successful login. Admins have no dedicated views.
    #[must_use]
    pub fn after_login(role: Role) -> Option<Self> {
        (role != Role::Admin).then_some(Self::Dashboard(role))
    }

    /// Navigation after a successful registration.
    #[must_use]
    pub fn after_register(role: Role) -> Option<Self> {
        (role != Role::Admin).then_some(Self::ProfileSetup(role))
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard(Role::Student) => STUDENT_DASHBOARD_PATH,
            Self::Dashboard(Role::Company) => COMPANY_DASHBOARD_PATH,
            Self::ProfileSetup(Role::Student) => STUDENT_PROFILE_PATH,
            Self::ProfileSetup(Role::Company) => COMPANY_PROFILE_PATH,
            Self::Dashboard(Role::Admin) | Self::ProfileSetup(Role::Admin) | Self::Landing => LANDING_PATH,
        }
    }
}

/// Home view for a signed-in role; used when a guard bounces a user.
#[must_use]
pub fn home_path(role: Role) -> &'static str {
    Navigation::Dashboard(role).path()
}
