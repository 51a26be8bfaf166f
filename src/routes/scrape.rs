//! Social profile scraping.

use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;
use tracing::warn;

use super::auth::AuthUser;
use super::error::ApiError;
use crate::services::scrape::{ScrapeError, ScrapedProfile, scrape_profile};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    username: String,
}

/// `POST /api/scrape/profile` — run the scraper for one username.
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ScrapeRequest>,
) -> Result<Json<Vec<ScrapedProfile>>, ApiError> {
    let scraper = state.scraper.as_ref().ok_or(ScrapeError::NotConfigured)?;
    let profiles = scrape_profile(scraper.as_ref(), &state.scrape_policy, &body.username)
        .await
        .inspect_err(|e| warn!(user_id = %auth.user.id, error = %e, "scrape: failed"))?;
    Ok(Json(profiles))
}

#[cfg(test)]
#[path = "scrape_test.rs"]
mod tests;
