//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. Every
//! field is a cheap clone over shared storage, so handlers clone freely. The
//! stores that back local persistence share one [`DirtyFlag`] with the
//! persistence task.

use std::sync::Arc;

use crate::llm::LlmChat;
use crate::rate_limit::RateLimiter;
use crate::services::ai::{AiService, DEFAULT_AI_MAX_TOKENS};
use crate::services::campaign::CampaignStore;
use crate::services::messaging::MessagingStore;
use crate::services::persistence::DirtyFlag;
use crate::services::profile::ProfileStore;
use crate::services::scrape::{PollPolicy, ScrapeApi};
use crate::services::session::SessionStore;
use crate::services::settings::SettingsStore;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub campaigns: Arc<dyn CampaignStore>,
    pub profiles: ProfileStore,
    pub settings: SettingsStore,
    pub messaging: MessagingStore,
    pub ai: AiService,
    /// Profile scraper. `None` if not configured.
    pub scraper: Option<Arc<dyn ScrapeApi>>,
    pub scrape_policy: PollPolicy,
    pub dirty: DirtyFlag,
}

/// Optional integrations wired into [`AppState::new`].
pub struct Integrations {
    pub llm: Option<Arc<dyn LlmChat>>,
    pub limiter: RateLimiter,
    pub ai_max_tokens: u32,
    pub scraper: Option<Arc<dyn ScrapeApi>>,
    pub scrape_policy: PollPolicy,
}

impl Default for Integrations {
    fn default() -> Self {
        Self {
            llm: None,
            limiter: RateLimiter::default(),
            ai_max_tokens: DEFAULT_AI_MAX_TOKENS,
            scraper: None,
            scrape_policy: PollPolicy::default(),
        }
    }
}

impl AppState {
    /// Build the state around an existing campaign store and dirty flag.
    /// Local stores start empty; fixture influencers appear in discovery
    /// when `seed_fixtures` holds.
    #[must_use]
    pub fn new(campaigns: Arc<dyn CampaignStore>, dirty: DirtyFlag, seed_fixtures: bool, integrations: Integrations) -> Self {
        let Integrations { llm, limiter, ai_max_tokens, scraper, scrape_policy } = integrations;
        Self {
            sessions: SessionStore::new(dirty.clone()),
            campaigns,
            profiles: ProfileStore::new(dirty.clone(), seed_fixtures),
            settings: SettingsStore::new(dirty.clone()),
            messaging: MessagingStore::new(),
            ai: AiService::new(llm, limiter, ai_max_tokens),
            scraper,
            scrape_policy,
            dirty,
        }
    }
}

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;
