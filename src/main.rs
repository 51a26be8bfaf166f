mod config;
mod db;
mod domain;
mod error;
mod llm;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing::{info, warn};

use crate::llm::LlmChat;
use crate::rate_limit::RateLimiter;
use crate::services::campaign::{CampaignStore, PgCampaignStore};
use crate::services::persistence::{self, DirtyFlag};
use crate::services::scrape::{ApifyClient, ScrapeApi};
use crate::services::{campaign, fixtures};
use crate::state::{AppState, Integrations};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env();
    let dirty = DirtyFlag::default();

    // Campaign store: Postgres when configured, in-memory otherwise.
    let campaigns: Arc<dyn CampaignStore> = match &config.database_url {
        Some(url) => {
            let pool = db::init_pool(url, config.db_max_connections)
                .await
                .expect("database init failed");
            let store = PgCampaignStore::new(pool);
            if config.seed_fixtures {
                store.seed(fixtures::campaigns()).await.expect("fixture seed failed");
            }
            info!("campaign store: postgres");
            Arc::new(store)
        }
        None => {
            info!("campaign store: in-memory");
            campaign::memory_store(dirty.clone(), config.seed_fixtures)
                .await
                .expect("fixture seed failed")
        }
    };

    // LLM client (non-fatal: AI features disabled if config missing).
    let llm: Option<Arc<dyn LlmChat>> =
        match llm::config::LlmConfig::from_env().and_then(llm::LlmClient::from_config) {
            Ok(client) => {
                info!(model = client.model(), "LLM client initialized");
                let client: Arc<dyn LlmChat> = Arc::new(client);
                Some(client)
            }
            Err(e) => {
                warn!(error = %e, "LLM client not configured; AI features disabled");
                None
            }
        };

    // Profile scraper (non-fatal, same as the LLM).
    let scrape_policy = config.scrape.as_ref().map(|s| s.policy).unwrap_or_default();
    let scraper: Option<Arc<dyn ScrapeApi>> = match config.scrape.clone().map(ApifyClient::new) {
        Some(Ok(client)) => {
            info!("profile scraper configured");
            let client: Arc<dyn ScrapeApi> = Arc::new(client);
            Some(client)
        }
        Some(Err(e)) => {
            warn!(error = %e, "profile scraper failed to build; scraping disabled");
            None
        }
        None => {
            warn!("SCRAPE_API_TOKEN/SCRAPE_ACTOR_ID not set; scraping disabled");
            None
        }
    };

    let state = AppState::new(
        campaigns,
        dirty,
        config.seed_fixtures,
        Integrations {
            llm,
            limiter: RateLimiter::new(config.rate_limit),
            ai_max_tokens: config.ai_max_tokens,
            scraper,
            scrape_policy,
        },
    );
    for contact in fixtures::contacts() {
        state.sessions.insert_user(contact);
    }

    // Restore local state and spawn the background flush.
    if let Some(path) = &config.data_file {
        match persistence::load(path).await {
            Ok(Some(snapshot)) => persistence::restore(&state, snapshot).await,
            Ok(None) => info!(path = %path.display(), "no local state file yet"),
            Err(e) => warn!(error = %e, path = %path.display(), "local state unreadable; starting empty"),
        }
        state.dirty.take();
        let _persistence = persistence::spawn_persistence_task(state.clone(), path.clone(), config.persist_interval);
    }

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    info!(port = config.port, "amplyst listening");
    axum::serve(listener, app).await.expect("server failed");
}
