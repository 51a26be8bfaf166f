//! In-memory rate limiting for AI requests.
//!
//! DESIGN
//! ======
//! Sliding-window counters backed by `HashMap<Uuid, VecDeque<Instant>>`.
//! Two limits are enforced on every AI call:
//! - Per-user: `RATE_LIMIT_PER_USER` requests per window (default 10/min)
//! - Global: `RATE_LIMIT_GLOBAL` requests per window (default 20/min)
//!
//! A rejected request is not recorded, so it does not extend the lockout.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use uuid::Uuid;

pub const DEFAULT_PER_USER_LIMIT: usize = 10;
pub const DEFAULT_PER_USER_WINDOW_SECS: u64 = 60;
pub const DEFAULT_GLOBAL_LIMIT: usize = 20;
pub const DEFAULT_GLOBAL_WINDOW_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub per_user_limit: usize,
    pub per_user_window: Duration,
    pub global_limit: usize,
    pub global_window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_user_limit: DEFAULT_PER_USER_LIMIT,
            per_user_window: Duration::from_secs(DEFAULT_PER_USER_WINDOW_SECS),
            global_limit: DEFAULT_GLOBAL_LIMIT,
            global_window: Duration::from_secs(DEFAULT_GLOBAL_WINDOW_SECS),
        }
    }
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum RateLimitError {
    #[error("per-user rate limit exceeded (max {limit} requests/{window_secs}s)")]
    PerUserExceeded { limit: usize, window_secs: u64 },
    #[error("global rate limit exceeded (max {limit} requests/{window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
}

// =============================================================================
// RATE LIMITER
// =============================================================================

#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<RateLimiterInner>>,
    config: RateLimitConfig,
}

#[derive(Default)]
struct RateLimiterInner {
    user_requests: HashMap<Uuid, VecDeque<Instant>>,
    global_requests: VecDeque<Instant>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self { inner: Arc::new(Mutex::new(RateLimiterInner::default())), config }
    }

    /// Check both per-user and global limits, then record the request.
    ///
    /// # Errors
    ///
    /// Returns which limit was hit. Nothing is recorded on rejection.
    pub fn check_and_record(&self, user_id: Uuid) -> Result<(), RateLimitError> {
        self.check_and_record_at(user_id, Instant::now())
    }

    fn check_and_record_at(&self, user_id: Uuid, now: Instant) -> Result<(), RateLimitError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let cfg = self.config;

        prune_window(&mut inner.global_requests, now, cfg.global_window);
        if inner.global_requests.len() >= cfg.global_limit {
            return Err(RateLimitError::GlobalExceeded {
                limit: cfg.global_limit,
                window_secs: cfg.global_window.as_secs(),
            });
        }

        let user_deque = inner.user_requests.entry(user_id).or_default();
        prune_window(user_deque, now, cfg.per_user_window);
        if user_deque.len() >= cfg.per_user_limit {
            return Err(RateLimitError::PerUserExceeded {
                limit: cfg.per_user_limit,
                window_secs: cfg.per_user_window.as_secs(),
            });
        }

        user_deque.push_back(now);
        inner.global_requests.push_back(now);
        Ok(())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
