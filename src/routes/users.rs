//! Profile update route.

use axum::extract::State;
use axum::response::Json;
use session::UserPatch;
use session::wire::UserEnvelope;

use super::ApiError;
use super::auth::AuthUser;
use crate::state::AppState;

/// `PATCH /api/users/me` — merge partial fields into the signed-in user.
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(patch): Json<UserPatch>,
) -> Result<Json<UserEnvelope>, ApiError> {
    let user = state.accounts.update(&auth.user.id, &patch).await?;
    tracing::info!(user_id = %user.id, "profile updated");
    Ok(Json(UserEnvelope { user }))
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
