use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

use crate::domain::user::UserRole;
use crate::routes::testing::call;
use crate::services::scrape::{PollPolicy, RunInfo, ScrapeApi, ScrapeError, ScrapedProfile};
use crate::state::Integrations;
use crate::state::test_helpers::{sign_in, test_app_state, test_app_state_with};

/// Every status check reports the same status.
struct FixedStatus(&'static str);

#[async_trait::async_trait]
impl ScrapeApi for FixedStatus {
    async fn start_run(&self, _username: &str) -> Result<RunInfo, ScrapeError> {
        Ok(RunInfo { id: "run".into(), status: "READY".into(), default_dataset_id: Some("ds".into()) })
    }

    async fn run_status(&self, _run_id: &str) -> Result<RunInfo, ScrapeError> {
        Ok(RunInfo { id: "run".into(), status: self.0.into(), default_dataset_id: Some("ds".into()) })
    }

    async fn dataset_items(&self, _dataset_id: &str) -> Result<Vec<ScrapedProfile>, ScrapeError> {
        Ok(vec![ScrapedProfile { name: "dancer".into(), fans: Some(42), ..ScrapedProfile::default() }])
    }
}

fn fast() -> PollPolicy {
    PollPolicy {
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(2),
        max_attempts: 3,
        overall_timeout: Duration::from_secs(5),
    }
}

async fn state_with(api: FixedStatus) -> crate::state::AppState {
    test_app_state_with(Integrations { scraper: Some(Arc::new(api)), scrape_policy: fast(), ..Integrations::default() })
        .await
}

#[tokio::test]
async fn succeeded_run_returns_items() {
    let state = state_with(FixedStatus("SUCCEEDED")).await;
    let (token, _) = sign_in(&state, "scrape@influencer.co", UserRole::Influencer);
    let (status, body) = call(&state, "POST", "/api/scrape/profile", Some(&token), Some(json!({"username": "dancer"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["fans"], 42);
}

#[tokio::test]
async fn failed_run_is_bad_gateway() {
    let state = state_with(FixedStatus("FAILED")).await;
    let (token, _) = sign_in(&state, "fail@influencer.co", UserRole::Influencer);
    let (status, body) = call(&state, "POST", "/api/scrape/profile", Some(&token), Some(json!({"username": "dancer"}))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["message"].as_str().unwrap().contains("actor run failed"));
}

#[tokio::test]
async fn endless_run_is_gateway_timeout() {
    let state = state_with(FixedStatus("RUNNING")).await;
    let (token, _) = sign_in(&state, "slow@influencer.co", UserRole::Influencer);
    let (status, _) = call(&state, "POST", "/api/scrape/profile", Some(&token), Some(json!({"username": "dancer"}))).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn unconfigured_scraper_is_503() {
    let state = test_app_state().await;
    let (token, _) = sign_in(&state, "none@influencer.co", UserRole::Influencer);
    let (status, body) = call(&state, "POST", "/api/scrape/profile", Some(&token), Some(json!({"username": "x"}))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "E_SCRAPE_NOT_CONFIGURED");
}
