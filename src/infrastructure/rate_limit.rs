//! Rate limiter implementation
//!
//! Sliding-window request limiting, scoped per caller (application or owner).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// A request quota over a rolling window
#[derive(Debug, Clone, Copy)]
pub struct RateLimitQuota {
    /// Maximum requests inside the window
    pub max_requests: u32,
    /// Window length
    pub window: Duration,
}

impl RateLimitQuota {
    pub const fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    /// Quota for event collection endpoints
    pub const fn collect() -> Self {
        Self::new(1000, Duration::from_secs(15 * 60))
    }

    /// Quota for key management endpoints
    pub const fn key_management() -> Self {
        Self::new(100, Duration::from_secs(15 * 60))
    }
}

/// Result of a rate limit check
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// Total limit for the window
    pub limit: u32,
    /// Time until the oldest counted request ages out
    pub reset_in: Duration,
}

/// Sliding-window rate limiter keyed by caller scope
#[derive(Debug)]
pub struct RateLimiter {
    /// Per-scope request timestamps
    records: Arc<RwLock<HashMap<String, Vec<Instant>>>>,
    /// Cleanup interval
    cleanup_interval: Duration,
    /// Last cleanup time
    last_cleanup: Arc<RwLock<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            cleanup_interval: Duration::from_secs(300),
            last_cleanup: Arc::new(RwLock::new(Instant::now())),
        }
    }

    /// Check the quota for a scope and record the request if allowed
    pub async fn check_and_record(&self, scope: &str, quota: &RateLimitQuota) -> RateLimitResult {
        self.maybe_cleanup(quota.window).await;

        let now = Instant::now();
        let mut records = self.records.write().await;

        let timestamps = records.entry(scope.to_string()).or_default();
        timestamps.retain(|t| now.duration_since(*t) < quota.window);

        let used = timestamps.len() as u32;

        if used >= quota.max_requests {
            let reset_in = timestamps
                .first()
                .map(|t| quota.window.saturating_sub(now.duration_since(*t)))
                .unwrap_or(quota.window);

            return RateLimitResult {
                allowed: false,
                remaining: 0,
                limit: quota.max_requests,
                reset_in,
            };
        }

        timestamps.push(now);

        RateLimitResult {
            allowed: true,
            remaining: quota.max_requests - used - 1,
            limit: quota.max_requests,
            reset_in: quota.window,
        }
    }

    /// Drop all counters for a scope
    pub async fn reset(&self, scope: &str) {
        let mut records = self.records.write().await;
        records.remove(scope);
    }

    async fn maybe_cleanup(&self, window: Duration) {
        let now = Instant::now();

        {
            let last = self.last_cleanup.read().await;
            if now.duration_since(*last) < self.cleanup_interval {
                return;
            }
        }

        let mut last = self.last_cleanup.write().await;
        *last = now;

        let mut records = self.records.write().await;
        records.retain(|_, timestamps| {
            timestamps.retain(|t| now.duration_since(*t) < window);
            !timestamps.is_empty()
        });
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
