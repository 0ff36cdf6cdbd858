//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON auth API and serves the built client as static
//! files. Unknown non-API paths fall back to `index.html` so client-side
//! routes survive a reload.

pub mod auth;
pub mod users;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, patch, post};
use session::wire::{
    self, CODE_EMAIL_TAKEN, CODE_INVALID_CREDENTIALS, CODE_INVALID_EMAIL, CODE_MISSING_FIELD, CODE_UNAUTHENTICATED,
    ErrorBody,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::services::accounts::AccountError;
use crate::state::AppState;

// =============================================================================
// ERRORS
// =============================================================================

/// JSON error response: status plus `{error, message}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self { status, body: ErrorBody::new(code, message) }
    }

    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, CODE_UNAUTHENTICATED, "not signed in")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub(crate) fn account_error_to_status(err: &AccountError) -> StatusCode {
    match err {
        AccountError::MissingField(_) | AccountError::InvalidEmail => StatusCode::BAD_REQUEST,
        AccountError::InvalidCredentials | AccountError::NotFound(_) => StatusCode::UNAUTHORIZED,
        AccountError::EmailTaken => StatusCode::CONFLICT,
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        let code = match &err {
            AccountError::MissingField(_) => CODE_MISSING_FIELD,
            AccountError::InvalidEmail => CODE_INVALID_EMAIL,
            AccountError::InvalidCredentials => CODE_INVALID_CREDENTIALS,
            AccountError::EmailTaken => CODE_EMAIL_TAKEN,
            // The session points at an account that no longer exists.
            AccountError::NotFound(_) => CODE_UNAUTHENTICATED,
        };
        Self::new(account_error_to_status(&err), code, err.to_string())
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// JSON API routes.
pub fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(wire::LOGIN_ENDPOINT, post(auth::login))
        .route(wire::REGISTER_ENDPOINT, post(auth::register))
        .route(wire::LOGOUT_ENDPOINT, post(auth::logout))
        .route(wire::ME_ENDPOINT, get(auth::me))
        .route(wire::UPDATE_ME_ENDPOINT, patch(users::update_me))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Full application: API plus the static client with SPA fallback.
pub fn app(state: AppState) -> Router {
    let site_dir = state.config.site_dir.clone();
    let index = ServeFile::new(site_dir.join("index.html"));
    let site = ServeDir::new(&site_dir).fallback(index);

    api_routes(state)
        .fallback_service(site)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
