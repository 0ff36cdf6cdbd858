//! The session state container.
//!
//! SYSTEM CONTEXT
//! ==============
//! One container exists per running client. The view layer constructs it with
//! an [`AuthService`] and an [`IdentityStore`], calls [`initialize`] once at
//! startup, and drives it from form submits and buttons. Guards read the
//! session through [`SessionContainer::session`] or a change listener.
//!
//! DESIGN
//! ======
//! Operations take `&self`: the session lives in a `RefCell` that is borrowed
//! only between awaits, never across one. That keeps the loading state
//! observable while a service call is suspended, and lets a second call made
//! during that window be rejected with [`SessionError::Busy`] instead of
//! racing the first.
//!
//! Operations return the [`Navigation`] the caller should perform rather than
//! navigating themselves.
//!
//! [`initialize`]: SessionContainer::initialize

#[cfg(test)]
#[path = "container_test.rs"]
mod container_test;

use std::cell::RefCell;
use std::fmt;

use tracing::{debug, info, warn};

use crate::error::{AuthError, SessionError};
use crate::nav::Navigation;
use crate::service::AuthService;
use crate::state::Session;
use crate::store::IdentityStore;
use crate::user::{Credentials, Registration, Role, UserPatch, UserRecord};

type Listener = Box<dyn Fn(&Session)>;

pub struct SessionContainer<A, S> {
    auth: A,
    store: S,
    session: RefCell<Session>,
    listener: Option<Listener>,
}

impl<A, S> fmt::Debug for SessionContainer<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContainer")
            .field("session", &self.session.borrow())
            .field("listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl<A: AuthService, S: IdentityStore> SessionContainer<A, S> {
    /// New container in the startup state (anonymous, loading).
    pub fn new(auth: A, store: S) -> Self {
        Self { auth, store, session: RefCell::new(Session::default()), listener: None }
    }

    /// Install a callback run after every session change.
    #[must_use]
    pub fn with_listener(mut self, listener: impl Fn(&Session) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn mutate(&self, f: impl FnOnce(&mut Session)) {
        f(&mut self.session.borrow_mut());
        if let Some(listener) = &self.listener {
            let snapshot = self.session.borrow().clone();
            listener(&snapshot);
        }
    }

    /// Enter the loading sub-state, or refuse if another call is pending.
    ///
    /// The startup loading flag only means "not hydrated yet" and does not
    /// block an operation.
    fn begin(&self) -> Result<(), SessionError> {
        let pending = {
            let session = self.session.borrow();
            session.is_hydrated() && session.is_loading()
        };
        if pending {
            return Err(SessionError::Busy);
        }
        self.mutate(Session::begin);
        Ok(())
    }

    fn fail(&self, err: SessionError) -> SessionError {
        let message = err.user_message();
        self.mutate(|s| s.failed(message));
        err
    }

    fn persist(&self, user: &UserRecord) {
        let raw = match serde_json::to_string(user) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "failed to serialize user record");
                return;
            }
        };
        if let Err(e) = self.store.save(&raw) {
            warn!(error = %e, "failed to persist user record");
        }
    }

    /// Rebuild the session from the identity store.
    ///
    /// Missing data yields an anonymous session. Unreadable or corrupt data is
    /// cleared and yields an anonymous session with a generic error. Loading
    /// is always off afterwards. Only the first call has any effect, and it
    /// is skipped once another operation has already driven the session.
    pub fn initialize(&self) {
        if self.session.borrow().is_hydrated() {
            return;
        }

        let restored = self.store.load().map_err(|e| e.to_string()).and_then(|raw| {
            raw.map(|raw| serde_json::from_str::<UserRecord>(&raw).map_err(|e| e.to_string()))
                .transpose()
        });

        match restored {
            Ok(Some(user)) => {
                info!(user_id = %user.id, role = %user.role, "restored session");
                self.mutate(|s| s.hydrate(Some(user), None));
            }
            Ok(None) => {
                debug!("no stored session");
                self.mutate(|s| s.hydrate(None, None));
            }
            Err(reason) => {
                warn!(%reason, "discarding unreadable stored session");
                self.store.clear();
                let message = SessionError::HydrationFailure(reason).user_message();
                self.mutate(|s| s.hydrate(None, Some(message)));
            }
        }
    }

    /// Sign in with `email` and `password`.
    ///
    /// Only presence is checked locally; the service decides validity.
    ///
    /// # Errors
    ///
    /// [`SessionError::Busy`] if another operation is pending,
    /// [`SessionError::MissingField`] for blank input, and whatever the
    /// service reports (usually [`SessionError::InvalidCredentials`]).
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<Navigation>, SessionError> {
        self.begin()?;
        let credentials = match login_input(email, password) {
            Ok(c) => c,
            Err(e) => return Err(self.fail(e)),
        };

        match self.auth.authenticate(&credentials).await {
            Ok(user) => Ok(self.sign_in(user, Navigation::after_login)),
            Err(e) => {
                warn!(email = %credentials.email, error = %e, "login failed");
                Err(self.fail(credentials_rejected(e)))
            }
        }
    }

    /// Create an account and sign in as it.
    ///
    /// # Errors
    ///
    /// [`SessionError::Busy`], [`SessionError::MissingField`], or the
    /// service's failure (for example [`SessionError::EmailTaken`]).
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> Result<Option<Navigation>, SessionError> {
        self.begin()?;
        let registration = match register_input(email, password, name, role) {
            Ok(r) => r,
            Err(e) => return Err(self.fail(e)),
        };

        match self.auth.create(&registration).await {
            Ok(user) => Ok(self.sign_in(user, Navigation::after_register)),
            Err(e) => {
                warn!(email = %registration.email, error = %e, "registration failed");
                Err(self.fail(credentials_rejected(e)))
            }
        }
    }

    fn sign_in(&self, user: UserRecord, next: fn(Role) -> Option<Navigation>) -> Option<Navigation> {
        info!(user_id = %user.id, role = %user.role, "signed in");
        self.persist(&user);
        let navigation = next(user.role);
        self.mutate(|s| s.authenticated(user));
        navigation
    }

    /// Forget the signed-in user. Works from any state.
    pub fn logout(&self) -> Navigation {
        self.store.clear();
        if let Some(user) = self.session.borrow().user() {
            info!(user_id = %user.id, "signed out");
        }
        self.mutate(Session::reset);
        Navigation::Landing
    }

    /// Merge `patch` into the signed-in user and persist the result.
    ///
    /// # Errors
    ///
    /// [`SessionError::UpdateWithoutSession`] when nobody is signed in,
    /// [`SessionError::Busy`], or the service's failure. When the service
    /// answers [`AuthError::Unauthenticated`] the local session is dropped
    /// as well and [`SessionError::SessionExpired`] is returned.
    pub async fn update_user(&self, patch: &UserPatch) -> Result<UserRecord, SessionError> {
        self.begin()?;
        let current = self.session.borrow().user().cloned();
        let Some(current) = current else {
            return Err(self.fail(SessionError::UpdateWithoutSession));
        };

        match self.auth.update(&current, patch).await {
            Ok(updated) => {
                debug!(user_id = %updated.id, "user updated");
                self.persist(&updated);
                self.mutate(|s| s.authenticated(updated.clone()));
                Ok(updated)
            }
            Err(AuthError::Unauthenticated) => {
                info!(user_id = %current.id, "session expired on the service; signing out");
                self.store.clear();
                let message = SessionError::SessionExpired.user_message();
                self.mutate(|s| {
                    s.reset();
                    s.failed(message);
                });
                Err(SessionError::SessionExpired)
            }
            Err(e) => {
                warn!(user_id = %current.id, error = %e, "user update failed");
                Err(self.fail(e.into()))
            }
        }
    }
}

/// On the sign-in paths an unauthenticated answer means the credentials
/// were refused.
fn credentials_rejected(err: AuthError) -> SessionError {
    match err {
        AuthError::Unauthenticated => SessionError::InvalidCredentials,
        other => other.into(),
    }
}

fn required(value: &str, field: &'static str) -> Result<String, SessionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SessionError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

fn login_input(email: &str, password: &str) -> Result<Credentials, SessionError> {
    let email = required(email, "email address")?;
    if password.trim().is_empty() {
        return Err(SessionError::MissingField("password"));
    }
    Ok(Credentials { email, password: password.to_owned() })
}

fn register_input(email: &str, password: &str, name: &str, role: Role) -> Result<Registration, SessionError> {
    let email = required(email, "email address")?;
    if password.trim().is_empty() {
        return Err(SessionError::MissingField("password"));
    }
    let display_name = required(name, "name")?;
    Ok(Registration { email, password: password.to_owned(), display_name, role })
}
