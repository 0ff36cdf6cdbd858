//! The session value observed by views and guards.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::user::{Role, UserRecord};

/// Who, if anyone, is signed in on this client.
///
/// Fields are private: only [`crate::SessionContainer`] mutates a session, and
/// `is_authenticated` is derived from the user so the two can never disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    user: Option<UserRecord>,
    loading: bool,
    error: Option<String>,
    hydrated: bool,
}

impl Default for Session {
    /// The startup value: anonymous and loading until hydration settles.
    fn default() -> Self {
        Self { user: None, loading: true, error: None, hydrated: false }
    }
}

/// Coarse lifecycle state derived from a [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Anonymous,
    Authenticated(Role),
    Loading,
}

impl Session {
    #[must_use]
    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether hydration from storage has completed.
    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if !self.hydrated {
            return Phase::Uninitialized;
        }
        if self.loading {
            return Phase::Loading;
        }
        match &self.user {
            Some(user) => Phase::Authenticated(user.role),
            None => Phase::Anonymous,
        }
    }

    // -------------------------------------------------------------------------
    // transitions (container-only)
    // -------------------------------------------------------------------------

    pub(crate) fn hydrate(&mut self, user: Option<UserRecord>, error: Option<String>) {
        self.user = user;
        self.error = error;
        self.loading = false;
        self.hydrated = true;
    }

    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.hydrated = true;
    }

    pub(crate) fn authenticated(&mut self, user: UserRecord) {
        self.user = Some(user);
        self.loading = false;
        self.error = None;
    }

    pub(crate) fn failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub(crate) fn reset(&mut self) {
        self.user = None;
        self.loading = false;
        self.error = None;
        self.hydrated = true;
    }
}
