//! Profile and settings routes for the caller.

use axum::extract::State;
use axum::response::Json;

use super::auth::AuthUser;
use super::error::ApiError;
use crate::domain::profile::Profile;
use crate::domain::settings::UserSettings;
use crate::state::AppState;

/// `GET /api/profile` — saved profile for the current role, or a blank form.
pub async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Profile>, ApiError> {
    Ok(Json(state.profiles.get(&auth.user)?))
}

/// `PUT /api/profile`
pub async fn put_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(profile): Json<Profile>,
) -> Result<Json<Profile>, ApiError> {
    Ok(Json(state.profiles.save(&auth.user, profile)?))
}

/// `GET /api/settings`
pub async fn get_settings(State(state): State<AppState>, auth: AuthUser) -> Json<UserSettings> {
    Json(state.settings.get(auth.user.id))
}

/// `PUT /api/settings`
pub async fn put_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(settings): Json<UserSettings>,
) -> Json<UserSettings> {
    Json(state.settings.set(auth.user.id, settings))
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
