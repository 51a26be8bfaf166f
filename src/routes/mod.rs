//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON API for the dashboard. Every route under `/api` except signup and
//! login resolves the caller through [`auth::AuthUser`]; `/healthz` is open.

pub mod ai;
pub mod auth;
pub mod campaigns;
pub mod chats;
pub mod error;
pub mod influencers;
pub mod nav;
pub mod profile;
pub mod scrape;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// The full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/role", post(auth::switch_role))
        .route("/api/campaigns", get(campaigns::list).post(campaigns::create))
        .route("/api/campaigns/visible", get(campaigns::visible))
        .route("/api/campaigns/{id}", get(campaigns::get).delete(campaigns::delete))
        .route("/api/campaigns/{id}/status", patch(campaigns::set_status))
        .route("/api/campaigns/{id}/analytics", get(campaigns::analytics))
        .route("/api/campaigns/{id}/summary", post(campaigns::summary))
        .route("/api/influencers", get(influencers::discover))
        .route("/api/profile", get(profile::get_profile).put(profile::put_profile))
        .route("/api/settings", get(profile::get_settings).put(profile::put_settings))
        .route("/api/ai/match", post(ai::match_route))
        .route("/api/ai/summary", post(ai::summary_route))
        .route("/api/chats", get(chats::list))
        .route("/api/chats/{id}/messages", get(chats::messages).post(chats::send))
        .route("/api/chats/{id}/read", post(chats::mark_read))
        .route("/api/scrape/profile", post(scrape::profile))
        .route("/api/nav", get(nav::nav))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
pub(crate) mod testing;
