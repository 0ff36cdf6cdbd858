//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app root builds one [`AuthState`] and provides it as context. Guards
//! and pages read the mirrored `session` signal; forms call through to the
//! container, which pushes every change back into that signal.
//!
//! DESIGN
//! ======
//! The container is not `Send` (it owns a `RefCell` and a boxed listener), so
//! it lives in local arena storage. The signal mirror is plain data and is
//! what the reactive graph tracks.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use leptos::prelude::*;
use session::{AuthError, Navigation, Session, SessionContainer, UserRecord};

use crate::net::api::{self, HttpAuthService};
use crate::util::storage::LocalStore;

pub type ClientContainer = SessionContainer<HttpAuthService, LocalStore>;

/// Handle to the session container and its reactive mirror.
#[derive(Clone, Copy)]
pub struct AuthState {
    pub session: RwSignal<Session>,
    container: StoredValue<Rc<ClientContainer>, LocalStorage>,
}

impl AuthState {
    /// Build the container and wire its change listener to the signal.
    pub fn new() -> Self {
        let session = RwSignal::new(Session::default());
        let container = SessionContainer::new(HttpAuthService, LocalStore::new())
            .with_listener(move |next: &Session| session.set(next.clone()));
        Self { session, container: StoredValue::new_local(Rc::new(container)) }
    }

    pub fn container(&self) -> Rc<ClientContainer> {
        self.container.get_value()
    }

    /// Clear the local session and tell the server to drop its cookie.
    pub fn logout(&self) -> Navigation {
        let navigation = self.container().logout();
        leptos::task::spawn_local(api::logout());
        navigation
    }

    /// Restore the stored session, then check it against the server.
    pub fn start(&self) {
        let container = self.container();
        container.initialize();
        if !container.session().is_authenticated() {
            return;
        }
        let this = *self;
        leptos::task::spawn_local(async move {
            let remote = api::fetch_current_user().await;
            if should_drop_local(&this.session.get_untracked(), &remote) {
                log::info!("server session expired; signing out locally");
                this.container().logout();
            }
        });
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Auth state from context. Panics outside the app root, like any missing
/// context.
pub fn expect_auth() -> AuthState {
    expect_context::<AuthState>()
}

/// Whether a restored session should be discarded after asking the server.
///
/// Only an explicit "not signed in" answer drops it; an unreachable server
/// keeps the local session.
pub fn should_drop_local(local: &Session, remote: &Result<UserRecord, AuthError>) -> bool {
    local.is_authenticated() && matches!(remote, Err(AuthError::Unauthenticated))
}
