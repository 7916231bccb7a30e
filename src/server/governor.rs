//! Per-client request throttling.
//!
//! A fixed window counter per client: the first request opens a window with
//! count 1, later requests increment it, and once the count passes the limit
//! every request is denied until the window expires. This is approximate
//! abuse mitigation, not metering.
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Counter state for one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub reset_at: Instant,
}

/// Outcome of a [`RequestGovernor::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed { remaining: u32 },
    Denied { retry_after: Duration },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed { .. })
    }
}

/// Owns the per-client counters shared by every request handler.
#[derive(Debug)]
pub struct RequestGovernor {
    limit: u32,
    window: Duration,
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl RequestGovernor {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Count a request from `client` at `now` and decide whether to serve it.
    pub fn check(&self, client: &str, now: Instant) -> Decision {
        let fresh = self.fresh_entry(now);
        let mut entries = self.entries.lock();

        let entry = entries
            .entry(client.to_string())
            .and_modify(|entry| {
                if now < entry.reset_at {
                    entry.count = entry.count.saturating_add(1);
                } else {
                    debug!(client = %client, "rate limit window reset");
                    *entry = fresh;
                }
            })
            .or_insert(fresh);

        if entry.count > self.limit {
            let retry_after = entry.reset_at.saturating_duration_since(now);
            warn!(
                client = %client,
                count = entry.count,
                limit = self.limit,
                "rate limit exceeded"
            );
            Decision::Denied { retry_after }
        } else {
            Decision::Allowed {
                remaining: self.limit - entry.count,
            }
        }
    }

    fn fresh_entry(&self, now: Instant) -> RateLimitEntry {
        RateLimitEntry {
            count: 1,
            reset_at: now + self.window,
        }
    }

    /// Drop every window that has expired by `now`; returns how many went.
    pub fn sweep(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| now < entry.reset_at);
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, remaining = entries.len(), "swept rate limit windows");
        }
        removed
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.entries.lock().len()
    }

    /// Current counter for `client`, if it has an open or stale window.
    pub fn entry(&self, client: &str) -> Option<RateLimitEntry> {
        self.entries.lock().get(client).copied()
    }

    /// Run [`sweep`](Self::sweep) every `interval` on the tokio runtime.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let governor = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                governor.sweep(Instant::now());
            }
        })
    }
}
