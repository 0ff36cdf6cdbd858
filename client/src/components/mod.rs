//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the shared [`crate::state::auth::AuthState`] from Leptos
//! context; pages compose them.

pub mod protected_route;
pub mod site_header;
