//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates session changes to
//! the container in [`crate::state::auth::AuthState`]. Input validation lives
//! in plain functions next to each page so it can be tested natively.

pub mod dashboard;
pub mod landing;
pub mod login;
pub mod profile;
pub mod register;
pub mod sections;
