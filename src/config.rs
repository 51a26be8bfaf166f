//! Server configuration from environment variables.
//!
//! Every value has a default; unparsable values fall back to the default
//! rather than failing startup. LLM settings live in [`crate::llm::config`]
//! because a missing key there disables AI instead of using a default.

use std::path::PathBuf;
use std::time::Duration;

use crate::rate_limit::{
    DEFAULT_GLOBAL_LIMIT, DEFAULT_GLOBAL_WINDOW_SECS, DEFAULT_PER_USER_LIMIT, DEFAULT_PER_USER_WINDOW_SECS,
    RateLimitConfig,
};
use crate::services::ai::DEFAULT_AI_MAX_TOKENS;
use crate::services::scrape::ScrapeConfig;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_PERSIST_INTERVAL_MS: u64 = 1_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    /// Postgres campaign store when set; in-memory otherwise.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// Local state file. Nothing is persisted when unset.
    pub data_file: Option<PathBuf>,
    pub persist_interval: Duration,
    pub seed_fixtures: bool,
    pub ai_max_tokens: u32,
    pub rate_limit: RateLimitConfig,
    pub scrape: Option<ScrapeConfig>,
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT),
            database_url: non_empty("DATABASE_URL"),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            data_file: non_empty("DATA_FILE").map(PathBuf::from),
            persist_interval: Duration::from_millis(
                parse_or(&lookup, "PERSIST_INTERVAL_MS", DEFAULT_PERSIST_INTERVAL_MS).max(1),
            ),
            seed_fixtures: lookup("SEED_FIXTURES").as_deref().and_then(parse_bool).unwrap_or(true),
            ai_max_tokens: parse_or(&lookup, "AI_MAX_TOKENS", DEFAULT_AI_MAX_TOKENS),
            rate_limit: RateLimitConfig {
                per_user_limit: parse_or(&lookup, "RATE_LIMIT_PER_USER", DEFAULT_PER_USER_LIMIT),
                per_user_window: Duration::from_secs(parse_or(
                    &lookup,
                    "RATE_LIMIT_PER_USER_WINDOW_SECS",
                    DEFAULT_PER_USER_WINDOW_SECS,
                )),
                global_limit: parse_or(&lookup, "RATE_LIMIT_GLOBAL", DEFAULT_GLOBAL_LIMIT),
                global_window: Duration::from_secs(parse_or(
                    &lookup,
                    "RATE_LIMIT_GLOBAL_WINDOW_SECS",
                    DEFAULT_GLOBAL_WINDOW_SECS,
                )),
            },
            scrape: ScrapeConfig::from_lookup(&lookup),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
