//! Influencer discovery.

use axum::extract::{Query, State};
use axum::response::Json;

use super::auth::AuthUser;
use super::error::ApiError;
use crate::domain::profile::InfluencerProfile;
use crate::services::filter::{InfluencerFilter, InfluencerQuery, filter_influencers};
use crate::state::AppState;

/// `GET /api/influencers` — filtered discovery directory (brand/agency only).
pub async fn discover(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<InfluencerQuery>,
) -> Result<Json<Vec<InfluencerProfile>>, ApiError> {
    auth.require_manager()?;
    let filter = InfluencerFilter::from(query);
    Ok(Json(filter_influencers(state.profiles.influencer_directory(), &filter)))
}

#[cfg(test)]
#[path = "influencers_test.rs"]
mod tests;
