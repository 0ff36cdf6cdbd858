//! Auth routes: login, registration, logout, and the current-user check.

use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use session::wire::UserEnvelope;
use session::{Credentials, Registration, UserRecord};
use time::Duration;

use super::ApiError;
use crate::config::ServerConfig;
use crate::state::AppState;

pub const COOKIE_NAME: &str = "session_token";

pub(crate) fn session_cookie(config: &ServerConfig, token: String) -> Cookie<'static> {
    let max_age = i64::try_from(config.session_ttl.as_secs()).unwrap_or(i64::MAX);
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(Duration::seconds(max_age))
        .build()
}

fn expired_cookie(config: &ServerConfig) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: UserRecord,
    pub token: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(ApiError::unauthenticated());
        }

        let app_state = AppState::from_ref(state);
        let user_id = app_state
            .sessions
            .validate(token)
            .await
            .ok_or_else(ApiError::unauthenticated)?;
        let user = app_state
            .accounts
            .get(&user_id)
            .await
            .ok_or_else(ApiError::unauthenticated)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/login` — verify credentials, set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<Credentials>,
) -> Result<Response, ApiError> {
    let user = state
        .accounts
        .authenticate(&body)
        .await
        .inspect_err(|e| tracing::warn!(email = %body.email, error = %e, "login rejected"))?;
    let token = state.sessions.create(&user.id).await;
    tracing::info!(user_id = %user.id, role = %user.role, "login");

    let jar = jar.add(session_cookie(&state.config, token));
    Ok((jar, Json(UserEnvelope { user })).into_response())
}

/// `POST /api/auth/register` — create an account and sign it in.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<Registration>,
) -> Result<Response, ApiError> {
    let user = state
        .accounts
        .register(&body)
        .await
        .inspect_err(|e| tracing::warn!(email = %body.email, error = %e, "registration rejected"))?;
    let token = state.sessions.create(&user.id).await;
    tracing::info!(user_id = %user.id, role = %user.role, "registered");

    let jar = jar.add(session_cookie(&state.config, token));
    Ok((StatusCode::CREATED, jar, Json(UserEnvelope { user })).into_response())
}

/// `GET /api/auth/me` — return the current user.
pub async fn me(auth: AuthUser) -> Json<UserEnvelope> {
    Json(UserEnvelope { user: auth.user })
}

/// `POST /api/auth/logout` — delete the session if any, clear the cookie.
///
/// Succeeds without a session so clients can always call it.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(token) = jar.get(COOKIE_NAME).map(Cookie::value) {
        state.sessions.delete(token).await;
    }
    let jar = CookieJar::new().add(expired_cookie(&state.config));
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
