//! REST API client for the auth endpoints.
//!
//! Browser (csr): real HTTP calls via `gloo-net`.
//! Native builds and tests: calls fail with [`AuthError::Transport`] since
//! these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure becomes an [`AuthError`]. Error bodies are decoded into
//! their wire codes when possible and fall back to the status code otherwise,
//! so the session container can surface a generic message without panicking.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
#[cfg(any(test, feature = "csr"))]
use session::wire::{self, ErrorBody, UserEnvelope};
use session::{AuthError, AuthService, Credentials, Registration, UserPatch, UserRecord};

/// Decode a response from any endpoint that answers with `{user}`.
#[cfg(any(test, feature = "csr"))]
fn decode_user_response(status: u16, body: &str) -> Result<UserRecord, AuthError> {
    if (200..300).contains(&status) {
        return serde_json::from_str::<UserEnvelope>(body)
            .map(|envelope| envelope.user)
            .map_err(|e| AuthError::Transport(format!("malformed response: {e}")));
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => Err(err.into_auth_error(status)),
        Err(_) => Err(wire::status_to_auth_error(status)),
    }
}

#[cfg(feature = "csr")]
fn transport(err: gloo_net::Error) -> AuthError {
    AuthError::Transport(err.to_string())
}

#[cfg(feature = "csr")]
async fn send_for_user<B: serde::Serialize>(
    builder: gloo_net::http::RequestBuilder,
    body: &B,
) -> Result<UserRecord, AuthError> {
    let resp = builder.json(body).map_err(transport)?.send().await.map_err(transport)?;
    let status = resp.status();
    let text = resp.text().await.map_err(transport)?;
    decode_user_response(status, &text)
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> AuthError {
    AuthError::Transport("not available outside the browser".to_owned())
}

/// [`AuthService`] backed by the internmatch API server.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpAuthService;

#[async_trait(?Send)]
impl AuthService for HttpAuthService {
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserRecord, AuthError> {
        #[cfg(feature = "csr")]
        {
            send_for_user(gloo_net::http::Request::post(wire::LOGIN_ENDPOINT), credentials).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = credentials;
            Err(unavailable())
        }
    }

    async fn create(&self, registration: &Registration) -> Result<UserRecord, AuthError> {
        #[cfg(feature = "csr")]
        {
            send_for_user(gloo_net::http::Request::post(wire::REGISTER_ENDPOINT), registration).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = registration;
            Err(unavailable())
        }
    }

    /// The server identifies the user by session cookie, so only the patch
    /// is sent.
    async fn update(&self, _user: &UserRecord, patch: &UserPatch) -> Result<UserRecord, AuthError> {
        #[cfg(feature = "csr")]
        {
            send_for_user(gloo_net::http::Request::patch(wire::UPDATE_ME_ENDPOINT), patch).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = patch;
            Err(unavailable())
        }
    }
}

/// Fetch the user the server's session cookie belongs to.
///
/// # Errors
///
/// [`AuthError::Unauthenticated`] when the cookie is missing or expired,
/// [`AuthError::Transport`] when the server cannot be reached.
pub async fn fetch_current_user() -> Result<UserRecord, AuthError> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::get(wire::ME_ENDPOINT)
            .send()
            .await
            .map_err(transport)?;
        let status = resp.status();
        let text = resp.text().await.map_err(transport)?;
        decode_user_response(status, &text)
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(unavailable())
    }
}

/// Log out the current user by calling `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "csr")]
    {
        if let Err(e) = gloo_net::http::Request::post(wire::LOGOUT_ENDPOINT).send().await {
            log::warn!("logout request failed: {e}");
        }
    }
}
