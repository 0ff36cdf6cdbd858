//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the session crate's `AuthService` over the server's JSON
//! endpoints and exposes the remaining fire-and-forget calls.

pub mod api;
