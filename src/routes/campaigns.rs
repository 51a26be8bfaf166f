//! Campaign routes: create, list, detail, status, delete, analytics, summary.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::auth::AuthUser;
use super::error::ApiError;
use crate::domain::analytics::AnalyticsReport;
use crate::domain::campaign::{Campaign, CampaignStatus, NewCampaign};
use crate::services::analytics;
use crate::services::campaign::{self as campaign_svc, CampaignError};
use crate::services::filter::{CampaignFilter, CampaignQuery, filter_campaigns};
use crate::services::summary::{SummaryInput, SummaryOutput, summarize_campaign};
use crate::state::AppState;

#[derive(Serialize)]
pub struct CreatedResponse {
    id: Uuid,
}

#[derive(Deserialize)]
pub struct StatusRequest {
    status: CampaignStatus,
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    confirm: bool,
}

async fn load(state: &AppState, id: Uuid) -> Result<Campaign, ApiError> {
    campaign_svc::get_campaign_details(state.campaigns.as_ref(), id)
        .await?
        .ok_or_else(|| CampaignError::NotFound(id).into())
}

/// `POST /api/campaigns` — create a draft campaign.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(form): Json<NewCampaign>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id =
        campaign_svc::create_campaign(state.campaigns.as_ref(), Some(&auth.user), form, OffsetDateTime::now_utc()).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// `GET /api/campaigns` — every campaign, most recent first, optionally filtered.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<CampaignQuery>,
) -> Result<Json<Vec<Campaign>>, ApiError> {
    let filter = CampaignFilter::try_from(query)?;
    let all = campaign_svc::list_campaigns(state.campaigns.as_ref()).await?;
    Ok(Json(filter_campaigns(all, &filter)))
}

/// `GET /api/campaigns/visible` — the caller's dashboard campaigns.
pub async fn visible(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<Campaign>>, ApiError> {
    Ok(Json(campaign_svc::visible_campaigns(state.campaigns.as_ref(), &auth.user).await?))
}

/// `GET /api/campaigns/{id}`
pub async fn get(State(state): State<AppState>, _auth: AuthUser, Path(id): Path<Uuid>) -> Result<Json<Campaign>, ApiError> {
    Ok(Json(load(&state, id).await?))
}

/// `PATCH /api/campaigns/{id}/status`
pub async fn set_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<Campaign>, ApiError> {
    let updated = campaign_svc::set_campaign_status(
        state.campaigns.as_ref(),
        Some(&auth.user),
        id,
        body.status,
        OffsetDateTime::now_utc(),
    )
    .await?;
    Ok(Json(updated))
}

/// `DELETE /api/campaigns/{id}?confirm=true`
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, ApiError> {
    campaign_svc::delete_campaign(state.campaigns.as_ref(), Some(&auth.user), id, query.confirm).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/campaigns/{id}/analytics` — mock performance figures.
pub async fn analytics(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalyticsReport>, ApiError> {
    let campaign = load(&state, id).await?;
    Ok(Json(analytics::analytics_for(&campaign).into()))
}

/// `POST /api/campaigns/{id}/summary` — AI summary of the campaign's analytics.
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SummaryOutput>, ApiError> {
    auth.require_manager()?;
    let campaign = load(&state, id).await?;
    let input = SummaryInput::from_campaign(&campaign, &analytics::analytics_for(&campaign));
    Ok(Json(summarize_campaign(&state.ai, auth.user.id, &input).await?))
}

#[cfg(test)]
#[path = "campaigns_test.rs"]
mod tests;
