//! Campaign service: creation, queries, and owner-only mutations.
//!
//! DESIGN
//! ======
//! Storage sits behind the [`CampaignStore`] trait. The in-memory store is
//! the default and is seeded with the demo campaigns; the Postgres store is
//! selected when a database is configured. The free functions in this module
//! carry the business rules (who may create, delete, or change status) and
//! are identical for both backends.
//!
//! ERROR HANDLING
//! ==============
//! Authorization is checked before the form is validated, and both happen
//! before anything is written, so a rejected request leaves the store
//! untouched.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use time::{Date, OffsetDateTime};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::domain::campaign::{Campaign, CampaignStatus, NewCampaign};
use crate::domain::user::{User, UserRole};
use crate::domain::validation::ValidationErrors;
use crate::services::fixtures;
use crate::services::persistence::DirtyFlag;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    #[error("sign in to manage campaigns")]
    Unauthenticated,
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("campaign not found: {0}")]
    NotFound(Uuid),
    #[error("deleting a campaign requires confirmation")]
    ConfirmationRequired,
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl crate::error::ErrorCode for CampaignError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "E_UNAUTHENTICATED",
            Self::Forbidden(_) => "E_FORBIDDEN",
            Self::NotFound(_) => "E_CAMPAIGN_NOT_FOUND",
            Self::ConfirmationRequired => "E_CONFIRMATION_REQUIRED",
            Self::Validation(_) => "E_VALIDATION",
            Self::Database(_) => "E_DATABASE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

/// Campaign persistence. Implementations only store and fetch; the rules
/// live in the module-level functions.
#[async_trait::async_trait]
pub trait CampaignStore: Send + Sync {
    async fn insert(&self, campaign: Campaign) -> Result<(), CampaignError>;

    /// Insert campaigns whose id is not yet present.
    async fn seed(&self, campaigns: Vec<Campaign>) -> Result<(), CampaignError>;

    /// Every campaign, most recently created first.
    async fn list(&self) -> Result<Vec<Campaign>, CampaignError>;

    async fn get(&self, id: Uuid) -> Result<Option<Campaign>, CampaignError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, CampaignError>;

    async fn update_status(
        &self,
        id: Uuid,
        status: CampaignStatus,
        now: OffsetDateTime,
    ) -> Result<Option<Campaign>, CampaignError>;

    /// User-created campaigns to include in the local snapshot. Stores with
    /// their own durability return nothing.
    async fn export_local(&self) -> Vec<Campaign> {
        Vec::new()
    }

    async fn restore_local(&self, _campaigns: Vec<Campaign>) {}
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Process-local store. Mutations raise the shared dirty flag so the
/// persistence task snapshots user-created campaigns.
pub struct MemoryCampaignStore {
    campaigns: RwLock<HashMap<Uuid, Campaign>>,
    dirty: DirtyFlag,
}

impl MemoryCampaignStore {
    #[must_use]
    pub fn new(dirty: DirtyFlag) -> Self {
        Self { campaigns: RwLock::new(HashMap::new()), dirty }
    }
}

fn newest_first(mut campaigns: Vec<Campaign>) -> Vec<Campaign> {
    campaigns.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    campaigns
}

#[async_trait::async_trait]
impl CampaignStore for MemoryCampaignStore {
    async fn insert(&self, campaign: Campaign) -> Result<(), CampaignError> {
        self.campaigns.write().await.insert(campaign.id, campaign);
        self.dirty.mark();
        Ok(())
    }

    async fn seed(&self, campaigns: Vec<Campaign>) -> Result<(), CampaignError> {
        let mut map = self.campaigns.write().await;
        for campaign in campaigns {
            map.entry(campaign.id).or_insert(campaign);
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Campaign>, CampaignError> {
        let all = self.campaigns.read().await.values().cloned().collect();
        Ok(newest_first(all))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Campaign>, CampaignError> {
        Ok(self.campaigns.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CampaignError> {
        let removed = self.campaigns.write().await.remove(&id).is_some();
        if removed {
            self.dirty.mark();
        }
        Ok(removed)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: CampaignStatus,
        now: OffsetDateTime,
    ) -> Result<Option<Campaign>, CampaignError> {
        let mut map = self.campaigns.write().await;
        let Some(campaign) = map.get_mut(&id) else {
            return Ok(None);
        };
        campaign.status = status;
        campaign.updated_at = now;
        let updated = campaign.clone();
        drop(map);
        self.dirty.mark();
        Ok(Some(updated))
    }

    async fn export_local(&self) -> Vec<Campaign> {
        let local = self
            .campaigns
            .read()
            .await
            .values()
            .filter(|c| !fixtures::is_fixture_campaign(c.id))
            .cloned()
            .collect();
        newest_first(local)
    }

    async fn restore_local(&self, campaigns: Vec<Campaign>) {
        let mut map = self.campaigns.write().await;
        for campaign in campaigns {
            map.insert(campaign.id, campaign);
        }
    }
}

// =============================================================================
// POSTGRES STORE
// =============================================================================

pub struct PgCampaignStore {
    pool: PgPool,
}

impl PgCampaignStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CampaignRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    goals: String,
    target_audience: String,
    budget: f64,
    description: String,
    content_requirements: String,
    start_date: Date,
    end_date: Date,
    status: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
    influencer_niche: Option<String>,
    target_audience_demographics: Option<String>,
}

impl From<CampaignRow> for Campaign {
    fn from(row: CampaignRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            goals: row.goals,
            target_audience: row.target_audience,
            budget: row.budget,
            description: row.description,
            content_requirements: row.content_requirements,
            start_date: row.start_date,
            end_date: row.end_date,
            // The table constraint only admits known statuses.
            status: CampaignStatus::parse(&row.status).unwrap_or(CampaignStatus::Draft),
            created_at: row.created_at,
            updated_at: row.updated_at,
            influencer_niche: row.influencer_niche,
            target_audience_demographics: row.target_audience_demographics,
        }
    }
}

const CAMPAIGN_COLUMNS: &str = "id, owner_id, name, goals, target_audience, budget, description, \
     content_requirements, start_date, end_date, status, created_at, updated_at, \
     influencer_niche, target_audience_demographics";

async fn insert_row(pool: &PgPool, campaign: &Campaign, on_conflict: &str) -> Result<(), sqlx::Error> {
    let sql = format!(
        "INSERT INTO campaigns ({CAMPAIGN_COLUMNS})
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) {on_conflict}"
    );
    sqlx::query(&sql)
        .bind(campaign.id)
        .bind(campaign.owner_id)
        .bind(&campaign.name)
        .bind(&campaign.goals)
        .bind(&campaign.target_audience)
        .bind(campaign.budget)
        .bind(&campaign.description)
        .bind(&campaign.content_requirements)
        .bind(campaign.start_date)
        .bind(campaign.end_date)
        .bind(campaign.status.as_str())
        .bind(campaign.created_at)
        .bind(campaign.updated_at)
        .bind(&campaign.influencer_niche)
        .bind(&campaign.target_audience_demographics)
        .execute(pool)
        .await?;
    Ok(())
}

#[async_trait::async_trait]
impl CampaignStore for PgCampaignStore {
    async fn insert(&self, campaign: Campaign) -> Result<(), CampaignError> {
        insert_row(&self.pool, &campaign, "").await?;
        Ok(())
    }

    async fn seed(&self, campaigns: Vec<Campaign>) -> Result<(), CampaignError> {
        for campaign in &campaigns {
            insert_row(&self.pool, campaign, "ON CONFLICT (id) DO NOTHING").await?;
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Campaign>, CampaignError> {
        let rows = sqlx::query_as::<_, CampaignRow>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns ORDER BY created_at DESC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Campaign::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Campaign>, CampaignError> {
        let row = sqlx::query_as::<_, CampaignRow>(&format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Campaign::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CampaignError> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: CampaignStatus,
        now: OffsetDateTime,
    ) -> Result<Option<Campaign>, CampaignError> {
        let row = sqlx::query_as::<_, CampaignRow>(&format!(
            "UPDATE campaigns SET status = $2, updated_at = $3 WHERE id = $1 RETURNING {CAMPAIGN_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Campaign::from))
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

fn require_manager(actor: Option<&User>) -> Result<&User, CampaignError> {
    let user = actor.ok_or(CampaignError::Unauthenticated)?;
    if !user.role.manages_campaigns() {
        return Err(CampaignError::Forbidden("only brands and agencies can manage campaigns"));
    }
    Ok(user)
}

async fn require_owned(store: &dyn CampaignStore, user: &User, id: Uuid) -> Result<Campaign, CampaignError> {
    let campaign = store.get(id).await?.ok_or(CampaignError::NotFound(id))?;
    if campaign.owner_id != user.id {
        return Err(CampaignError::Forbidden("only the campaign owner can change it"));
    }
    Ok(campaign)
}

/// Create a draft campaign owned by `actor` and return its id.
///
/// # Errors
///
/// `Unauthenticated` without an actor, `Forbidden` for roles that do not
/// manage campaigns, `Validation` for an invalid form, or a storage error.
pub async fn create_campaign(
    store: &dyn CampaignStore,
    actor: Option<&User>,
    form: NewCampaign,
    now: OffsetDateTime,
) -> Result<Uuid, CampaignError> {
    let user = require_manager(actor)?;
    form.validate()?;

    let campaign = form.into_campaign(user.id, now);
    let id = campaign.id;
    store.insert(campaign).await?;
    info!(campaign_id = %id, owner_id = %user.id, "campaign: created");
    Ok(id)
}

/// All campaigns, unfiltered, most recent first.
///
/// # Errors
///
/// Returns a storage error if the query fails.
pub async fn list_campaigns(store: &dyn CampaignStore) -> Result<Vec<Campaign>, CampaignError> {
    store.list().await
}

/// The campaign with `id`, or `None` when it does not exist.
///
/// # Errors
///
/// Returns a storage error if the query fails.
pub async fn get_campaign_details(store: &dyn CampaignStore, id: Uuid) -> Result<Option<Campaign>, CampaignError> {
    store.get(id).await
}

/// Campaigns the user's dashboard shows: open campaigns for influencers, the
/// user's own campaigns for brands and agencies.
///
/// # Errors
///
/// Returns a storage error if the query fails.
pub async fn visible_campaigns(store: &dyn CampaignStore, user: &User) -> Result<Vec<Campaign>, CampaignError> {
    let all = store.list().await?;
    let visible = match user.role {
        UserRole::Influencer => all
            .into_iter()
            .filter(|c| matches!(c.status, CampaignStatus::Active | CampaignStatus::Draft))
            .collect(),
        UserRole::Brand | UserRole::Agency => all.into_iter().filter(|c| c.owner_id == user.id).collect(),
        UserRole::None => Vec::new(),
    };
    Ok(visible)
}

/// Delete one of the actor's campaigns.
///
/// # Errors
///
/// `ConfirmationRequired` unless `confirmed`, `NotFound`, `Forbidden` for
/// non-owners, or a storage error.
pub async fn delete_campaign(
    store: &dyn CampaignStore,
    actor: Option<&User>,
    id: Uuid,
    confirmed: bool,
) -> Result<(), CampaignError> {
    let user = require_manager(actor)?;
    require_owned(store, user, id).await?;
    if !confirmed {
        return Err(CampaignError::ConfirmationRequired);
    }
    if !store.delete(id).await? {
        return Err(CampaignError::NotFound(id));
    }
    info!(campaign_id = %id, owner_id = %user.id, "campaign: deleted");
    Ok(())
}

/// Set the status of one of the actor's campaigns. Any status may follow any
/// other.
///
/// # Errors
///
/// `NotFound`, `Forbidden` for non-owners, or a storage error.
pub async fn set_campaign_status(
    store: &dyn CampaignStore,
    actor: Option<&User>,
    id: Uuid,
    status: CampaignStatus,
    now: OffsetDateTime,
) -> Result<Campaign, CampaignError> {
    let user = require_manager(actor)?;
    require_owned(store, user, id).await?;
    let updated = store
        .update_status(id, status, now)
        .await?
        .ok_or(CampaignError::NotFound(id))?;
    info!(campaign_id = %id, status = status.as_str(), "campaign: status changed");
    Ok(updated)
}

/// Build the default in-memory store, optionally seeded with the demo data.
///
/// # Errors
///
/// Never fails for the memory store; the signature matches the trait.
pub async fn memory_store(dirty: DirtyFlag, seed_fixtures: bool) -> Result<Arc<dyn CampaignStore>, CampaignError> {
    let store = MemoryCampaignStore::new(dirty);
    if seed_fixtures {
        store.seed(fixtures::campaigns()).await?;
    }
    Ok(Arc::new(store))
}

#[cfg(test)]
#[path = "campaign_test.rs"]
mod tests;
