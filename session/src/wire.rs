//! JSON bodies exchanged with the auth API.
//!
//! Requests reuse [`crate::Credentials`], [`crate::Registration`] and
//! [`crate::UserPatch`] directly; this module holds the response envelopes
//! and the error-code vocabulary both sides agree on.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::user::UserRecord;

pub const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub const REGISTER_ENDPOINT: &str = "/api/auth/register";
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";
pub const ME_ENDPOINT: &str = "/api/auth/me";
pub const UPDATE_ME_ENDPOINT: &str = "/api/users/me";

pub const CODE_MISSING_FIELD: &str = "missing_field";
pub const CODE_INVALID_EMAIL: &str = "invalid_email";
pub const CODE_INVALID_CREDENTIALS: &str = "invalid_credentials";
pub const CODE_EMAIL_TAKEN: &str = "email_taken";
pub const CODE_UNAUTHENTICATED: &str = "unauthenticated";
pub const CODE_INTERNAL: &str = "internal";

/// Successful response carrying a user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: UserRecord,
}

/// Error response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self { error: code.to_owned(), message: message.into() }
    }

    /// Map an error body received with `status` to the client-side error.
    #[must_use]
    pub fn into_auth_error(self, status: u16) -> AuthError {
        match self.error.as_str() {
            CODE_INVALID_CREDENTIALS => AuthError::InvalidCredentials,
            CODE_EMAIL_TAKEN => AuthError::EmailTaken,
            CODE_UNAUTHENTICATED => AuthError::Unauthenticated,
            _ => AuthError::Rejected(format!("{status}: {}", self.message)),
        }
    }
}

/// Map a failed response with an unparseable body to an error.
#[must_use]
pub fn status_to_auth_error(status: u16) -> AuthError {
    match status {
        401 => AuthError::Unauthenticated,
        409 => AuthError::EmailTaken,
        _ => AuthError::Rejected(format!("request failed: {status}")),
    }
}
