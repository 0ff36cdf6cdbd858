//! Authentication service seam and the in-process demo implementation.
//!
//! DESIGN
//! ======
//! The trait is `?Send` because browser HTTP futures are not `Send`; the
//! container itself is single-threaded, so nothing is lost on native targets.

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;

use std::cell::Cell;

use async_trait::async_trait;

use crate::error::AuthError;
use crate::user::{Credentials, Registration, Role, UserPatch, UserRecord, name_from_email};

/// Backend that verifies credentials and owns user records.
#[async_trait(?Send)]
pub trait AuthService {
    /// Verify credentials and return the matching user.
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserRecord, AuthError>;

    /// Create a new account.
    async fn create(&self, registration: &Registration) -> Result<UserRecord, AuthError>;

    /// Apply `patch` to `user` and return the stored result.
    async fn update(&self, user: &UserRecord, patch: &UserPatch) -> Result<UserRecord, AuthError>;
}

/// Demo backend with no directory behind it.
///
/// Every non-empty login succeeds. The role comes from
/// [`Role::guess_from_email`] and the display name from the email's local
/// part. Setting `reject_logins` makes every login fail with
/// [`AuthError::InvalidCredentials`].
#[derive(Debug, Default)]
pub struct MockAuthService {
    reject_logins: bool,
    calls: Cell<usize>,
}

impl MockAuthService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rejecting() -> Self {
        Self { reject_logins: true, calls: Cell::new(0) }
    }

    /// Number of service calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn record_call(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

#[async_trait(?Send)]
impl AuthService for MockAuthService {
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserRecord, AuthError> {
        self.record_call();
        if self.reject_logins || credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        let email = credentials.email.clone();
        let role = Role::guess_from_email(&email);
        let name = name_from_email(&email);
        Ok(UserRecord::new(email, name, role))
    }

    async fn create(&self, registration: &Registration) -> Result<UserRecord, AuthError> {
        self.record_call();
        Ok(UserRecord::new(
            registration.email.clone(),
            registration.display_name.clone(),
            registration.role,
        ))
    }

    async fn update(&self, user: &UserRecord, patch: &UserPatch) -> Result<UserRecord, AuthError> {
        self.record_call();
        let mut updated = user.clone();
        updated.apply(patch);
        Ok(updated)
    }
}
