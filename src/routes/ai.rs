//! AI routes: influencer matching and free-form campaign summaries.

use axum::extract::State;
use axum::response::Json;

use super::auth::AuthUser;
use super::error::ApiError;
use crate::services::matching::{MatchInput, MatchOutput, match_influencers};
use crate::services::summary::{SummaryInput, SummaryOutput, summarize_campaign};
use crate::state::AppState;

/// `POST /api/ai/match`
pub async fn match_route(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<MatchInput>,
) -> Result<Json<MatchOutput>, ApiError> {
    auth.require_manager()?;
    Ok(Json(match_influencers(&state.ai, auth.user.id, &input).await?))
}

/// `POST /api/ai/summary`
pub async fn summary_route(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<SummaryInput>,
) -> Result<Json<SummaryOutput>, ApiError> {
    auth.require_manager()?;
    Ok(Json(summarize_campaign(&state.ai, auth.user.id, &input).await?))
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
