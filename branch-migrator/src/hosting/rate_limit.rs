//! Rate limiting for the GitHub core API.

use octocrab::Octocrab;
use std::time::Duration;
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Rate limit information for the core API.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// Unix timestamp when the rate limit resets.
    pub reset: u64,
    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Seconds to sleep before the next request, if any.
    ///
    /// Capped at [`MAX_WAIT_SECS`].
    #[must_use]
    pub fn wait_secs(&self, now: u64) -> Option<u64> {
        if self.remaining >= MIN_REMAINING_THRESHOLD || self.reset <= now {
            return None;
        }
        Some((self.reset - now).min(MAX_WAIT_SECS))
    }
}

/// Checks the current core rate limit (repositories, refs, pulls).
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let core = &rate_limit.resources.core;

    Ok(RateLimitInfo {
        remaining: core.remaining as u32,
        reset: core.reset,
        limit: core.limit as u32,
    })
}

/// Waits if the rate limit is low, returning true if we waited.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let Some(wait_secs) = info.wait_secs(now) else {
        return false;
    };
    if info.reset - now > MAX_WAIT_SECS {
        warn!(
            reset = info.reset,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    info!(
        remaining = info.remaining,
        wait_secs, "Rate limit low, waiting for reset"
    );
    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
    true
}

/// Ensures sufficient core rate limit before a hosting call.
///
/// # Errors
///
/// Returns an error if the rate limit check fails.
pub async fn ensure_core_rate_limit(octocrab: &Octocrab) -> Result<(), octocrab::Error> {
    let info = check_core_rate_limit(octocrab).await?;
    wait_if_needed(&info).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_wait_with_plenty_remaining() {
        let info = RateLimitInfo {
            remaining: 100,
            reset: 2_000,
            limit: 5_000,
        };
        assert_eq!(info.wait_secs(1_000), None);
    }

    #[test]
    fn no_wait_after_reset() {
        let info = RateLimitInfo {
            remaining: 1,
            reset: 900,
            limit: 5_000,
        };
        assert_eq!(info.wait_secs(1_000), None);
    }

    #[test]
    fn waits_until_reset_when_low() {
        let info = RateLimitInfo {
            remaining: 2,
            reset: 1_060,
            limit: 5_000,
        };
        assert_eq!(info.wait_secs(1_000), Some(60));
    }

    #[test]
    fn caps_wait_at_one_hour() {
        let info = RateLimitInfo {
            remaining: 0,
            reset: 100_000,
            limit: 5_000,
        };
        assert_eq!(info.wait_secs(1_000), Some(MAX_WAIT_SECS));
    }

    #[tokio::test]
    async fn wait_if_needed_returns_immediately() {
        let info = RateLimitInfo {
            remaining: 100,
            reset: 0,
            limit: 5_000,
        };
        assert!(!wait_if_needed(&info).await);
    }
}
