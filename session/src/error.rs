//! Error types for the session container and its collaborators.
//!
//! ERROR HANDLING
//! ==============
//! No error here is fatal. Every failing container operation leaves the
//! session either anonymous or at its previous authenticated value, and
//! records [`SessionError::user_message`] in `Session::error` for display.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure reported by an [`crate::AuthService`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("email already registered")]
    EmailTaken,
    #[error("not authenticated")]
    Unauthenticated,
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Failure reported by an [`crate::IdentityStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Failure of a container operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Persisted identity could not be read or decoded.
    #[error("session hydration failed: {0}")]
    HydrationFailure(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("update requested without an authenticated user")]
    UpdateWithoutSession,
    /// The service no longer recognises the signed-in user.
    #[error("session expired")]
    SessionExpired,
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("email already registered")]
    EmailTaken,
    /// Another operation is still pending.
    #[error("operation already in progress")]
    Busy,
    #[error("auth service error: {0}")]
    Service(String),
}

impl SessionError {
    /// Text shown to the user and stored in `Session::error`.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::HydrationFailure(_) => "Authentication check failed. Please sign in again.".to_owned(),
            Self::InvalidCredentials => "Incorrect email address or password.".to_owned(),
            Self::UpdateWithoutSession => "You must be signed in to update your profile.".to_owned(),
            Self::SessionExpired => "Your session has expired. Please sign in again.".to_owned(),
            Self::MissingField(field) => format!("Please enter your {field}."),
            Self::EmailTaken => "An account with this email address already exists.".to_owned(),
            Self::Busy => "Please wait for the current request to finish.".to_owned(),
            Self::Service(_) => "Something went wrong. Please try again.".to_owned(),
        }
    }
}

impl From<AuthError> for SessionError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::EmailTaken => Self::EmailTaken,
            AuthError::Unauthenticated => Self::SessionExpired,
            AuthError::Rejected(msg) | AuthError::Transport(msg) => Self::Service(msg),
        }
    }
}
