//! Social-profile scraping through a hosted actor-run API.
//!
//! DESIGN
//! ======
//! A scrape is three calls: start an actor run for the username, poll the
//! run until it reaches a terminal status, then fetch the run's default
//! dataset. [`ScrapeApi`] abstracts the three calls so the polling logic is
//! tested against a scripted mock; [`ApifyClient`] is the HTTP version.
//!
//! Polling is bounded by [`PollPolicy`]: exponential backoff from the initial
//! delay (doubling, capped), a maximum number of status checks, and an
//! overall deadline around the whole poll loop.
//!
//! ERROR HANDLING
//! ==============
//! A terminal failure status ends the scrape with `RunFailed` and no dataset
//! is fetched. Exhausting attempts or the deadline is reported as its own
//! error rather than returning partial data.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const DEFAULT_SCRAPE_BASE_URL: &str = "https://api.apify.com/v2";
pub const DEFAULT_POLL_INITIAL_MS: u64 = 3_000;
pub const DEFAULT_POLL_MAX_MS: u64 = 30_000;
pub const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 20;
pub const DEFAULT_SCRAPE_TIMEOUT_SECS: u64 = 300;
const HTTP_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub max_attempts: u32,
    pub overall_timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(DEFAULT_POLL_INITIAL_MS),
            max_delay: Duration::from_millis(DEFAULT_POLL_MAX_MS),
            max_attempts: DEFAULT_POLL_MAX_ATTEMPTS,
            overall_timeout: Duration::from_secs(DEFAULT_SCRAPE_TIMEOUT_SECS),
        }
    }
}

impl PollPolicy {
    /// Delay before status check number `attempt` (zero-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt);
        self.initial_delay.saturating_mul(factor).min(self.max_delay)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    pub api_token: String,
    pub actor_id: String,
    pub base_url: String,
    pub policy: PollPolicy,
}

impl ScrapeConfig {
    /// `None` unless both `SCRAPE_API_TOKEN` and `SCRAPE_ACTOR_ID` are set.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let api_token = present("SCRAPE_API_TOKEN")?;
        let actor_id = present("SCRAPE_ACTOR_ID")?;
        let base_url = present("SCRAPE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_SCRAPE_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let num = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(default)
        };
        let policy = PollPolicy {
            initial_delay: Duration::from_millis(num("SCRAPE_POLL_INITIAL_MS", DEFAULT_POLL_INITIAL_MS)),
            max_delay: Duration::from_millis(num("SCRAPE_POLL_MAX_MS", DEFAULT_POLL_MAX_MS)),
            max_attempts: lookup("SCRAPE_POLL_MAX_ATTEMPTS")
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(DEFAULT_POLL_MAX_ATTEMPTS),
            overall_timeout: Duration::from_secs(num("SCRAPE_TIMEOUT_SECS", DEFAULT_SCRAPE_TIMEOUT_SECS)),
        };
        Some(Self { api_token, actor_id, base_url, policy })
    }
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("profile scraping is not configured")]
    NotConfigured,
    #[error("username is required")]
    MissingUsername,
    #[error("scrape request failed: {0}")]
    Request(String),
    #[error("scrape API error: status {status}")]
    Response { status: u16, body: String },
    #[error("scrape response parse failed: {0}")]
    Parse(String),
    #[error("actor run failed (status {status})")]
    RunFailed { status: String },
    #[error("actor run still unfinished after {attempts} status checks")]
    PollExhausted { attempts: u32 },
    #[error("actor run did not finish within {secs}s")]
    Timeout { secs: u64 },
}

impl crate::error::ErrorCode for ScrapeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotConfigured => "E_SCRAPE_NOT_CONFIGURED",
            Self::MissingUsername => "E_VALIDATION",
            Self::Request(_) => "E_SCRAPE_REQUEST",
            Self::Response { .. } => "E_SCRAPE_RESPONSE",
            Self::Parse(_) => "E_SCRAPE_PARSE",
            Self::RunFailed { .. } => "E_SCRAPE_RUN_FAILED",
            Self::PollExhausted { .. } => "E_SCRAPE_POLL_EXHAUSTED",
            Self::Timeout { .. } => "E_SCRAPE_TIMEOUT",
        }
    }

    fn retryable(&self) -> bool {
        matches!(
            self,
            Self::Request(_) | Self::Timeout { .. } | Self::PollExhausted { .. } | Self::Response { status: 429 | 500..=599, .. }
        )
    }
}

/// One scraped profile record. Fields the actor omits stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fans: Option<u64>,
    #[serde(default)]
    pub following: Option<u64>,
    #[serde(default)]
    pub heart: Option<u64>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

/// Actor run as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunInfo {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub default_dataset_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Pending,
    Succeeded,
    Failed,
}

impl RunPhase {
    /// Classify a raw run status. Anything not terminal is still pending.
    #[must_use]
    pub fn of(status: &str) -> Self {
        match status.to_ascii_uppercase().as_str() {
            "SUCCEEDED" => Self::Succeeded,
            "FAILED" | "TIMED-OUT" | "ABORTED" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

/// The three calls of a scrape.
#[async_trait::async_trait]
pub trait ScrapeApi: Send + Sync {
    async fn start_run(&self, username: &str) -> Result<RunInfo, ScrapeError>;
    async fn run_status(&self, run_id: &str) -> Result<RunInfo, ScrapeError>;
    async fn dataset_items(&self, dataset_id: &str) -> Result<Vec<ScrapedProfile>, ScrapeError>;
}

// =============================================================================
// FLOW
// =============================================================================

/// Scrape the profile matching `username`.
///
/// # Errors
///
/// `MissingUsername` for a blank name, `RunFailed` on a terminal failure
/// status, `PollExhausted`/`Timeout` when the run never finishes, or a
/// transport error from any of the calls.
pub async fn scrape_profile(
    api: &dyn ScrapeApi,
    policy: &PollPolicy,
    username: &str,
) -> Result<Vec<ScrapedProfile>, ScrapeError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ScrapeError::MissingUsername);
    }

    let run = api.start_run(username).await?;
    info!(run_id = %run.id, username, "scrape: run started");

    let finished = tokio::time::timeout(policy.overall_timeout, poll_until_finished(api, policy, &run.id))
        .await
        .map_err(|_| ScrapeError::Timeout { secs: policy.overall_timeout.as_secs() })??;

    let Some(dataset_id) = finished.default_dataset_id.or(run.default_dataset_id) else {
        return Err(ScrapeError::Parse("finished run has no defaultDatasetId".into()));
    };
    let items = api.dataset_items(&dataset_id).await?;
    info!(run_id = %run.id, items = items.len(), "scrape: dataset fetched");
    Ok(items)
}

/// Poll `run_id` with backoff until it succeeds.
///
/// # Errors
///
/// `RunFailed` on a terminal failure status, `PollExhausted` after
/// `max_attempts` pending checks, or a transport error.
pub async fn poll_until_finished(api: &dyn ScrapeApi, policy: &PollPolicy, run_id: &str) -> Result<RunInfo, ScrapeError> {
    for attempt in 0..policy.max_attempts {
        tokio::time::sleep(policy.delay_for(attempt)).await;
        let info = api.run_status(run_id).await?;
        match RunPhase::of(&info.status) {
            RunPhase::Succeeded => return Ok(info),
            RunPhase::Failed => {
                warn!(run_id, status = %info.status, "scrape: actor run failed");
                return Err(ScrapeError::RunFailed { status: info.status });
            }
            RunPhase::Pending => {}
        }
    }
    Err(ScrapeError::PollExhausted { attempts: policy.max_attempts })
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct ApifyClient {
    http: reqwest::Client,
    config: ScrapeConfig,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunInput<'a> {
    search_queries: [&'a str; 1],
    max_profiles_per_query: u32,
}

impl ApifyClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ScrapeConfig) -> Result<Self, ScrapeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| ScrapeError::Request(e.to_string()))?;
        Ok(Self { http, config })
    }

    async fn read(response: reqwest::Response) -> Result<String, ScrapeError> {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ScrapeError::Request(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(ScrapeError::Response { status, body: text });
        }
        Ok(text)
    }
}

fn parse_run(text: &str) -> Result<RunInfo, ScrapeError> {
    serde_json::from_str::<DataEnvelope<RunInfo>>(text)
        .map(|env| env.data)
        .map_err(|e| ScrapeError::Parse(e.to_string()))
}

fn parse_items(text: &str) -> Result<Vec<ScrapedProfile>, ScrapeError> {
    serde_json::from_str(text).map_err(|e| ScrapeError::Parse(e.to_string()))
}

#[async_trait::async_trait]
impl ScrapeApi for ApifyClient {
    async fn start_run(&self, username: &str) -> Result<RunInfo, ScrapeError> {
        let url = format!("{}/acts/{}/runs", self.config.base_url, self.config.actor_id);
        let response = self
            .http
            .post(url)
            .query(&[("token", &self.config.api_token)])
            .json(&RunInput { search_queries: [username], max_profiles_per_query: 1 })
            .send()
            .await
            .map_err(|e| ScrapeError::Request(e.to_string()))?;
        parse_run(&Self::read(response).await?)
    }

    async fn run_status(&self, run_id: &str) -> Result<RunInfo, ScrapeError> {
        let url = format!("{}/acts/{}/runs/{run_id}", self.config.base_url, self.config.actor_id);
        let response = self
            .http
            .get(url)
            .query(&[("token", &self.config.api_token)])
            .send()
            .await
            .map_err(|e| ScrapeError::Request(e.to_string()))?;
        parse_run(&Self::read(response).await?)
    }

    async fn dataset_items(&self, dataset_id: &str) -> Result<Vec<ScrapedProfile>, ScrapeError> {
        let url = format!("{}/datasets/{dataset_id}/items", self.config.base_url);
        let response = self
            .http
            .get(url)
            .query(&[("token", &self.config.api_token)])
            .send()
            .await
            .map_err(|e| ScrapeError::Request(e.to_string()))?;
        parse_items(&Self::read(response).await?)
    }
}

#[cfg(test)]
#[path = "scrape_test.rs"]
mod tests;
