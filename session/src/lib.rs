//! Client session state for internmatch.
//!
//! This crate owns the identity model shared by `client` and the API server:
//! the user record and its persisted JSON shape, the session container that
//! drives login/register/logout/update, the route table, and the guard that
//! decides whether a view may render.
//!
//! ARCHITECTURE
//! ============
//! The container never talks to a network or a browser directly. It depends on
//! two injected seams, [`service::AuthService`] and [`store::IdentityStore`],
//! and returns [`nav::Navigation`] values instead of performing redirects, so
//! every transition can be exercised in plain unit tests.

pub mod container;
pub mod error;
pub mod guard;
pub mod nav;
pub mod service;
pub mod state;
pub mod store;
pub mod user;
pub mod wire;

pub use container::SessionContainer;
pub use error::{AuthError, SessionError, StoreError};
pub use guard::{Access, GuardDecision};
pub use nav::Navigation;
pub use service::{AuthService, MockAuthService};
pub use state::{Phase, Session};
pub use store::{IdentityStore, MemoryStore, STORAGE_KEY};
pub use user::{Credentials, Registration, Role, UserPatch, UserRecord};
