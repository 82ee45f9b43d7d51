//! Rate Limiting Infrastructure
//!
//! Fixed-window request counting per `(operation, client identity)` pair.
//!
//! The window discipline is fixed, not sliding: a counter resets when its
//! window elapses, so a client can burst up to `2 x max_requests` across
//! a window boundary. That imprecision is part of the contract here;
//! callers wanting exactness need a different discipline, not a patched
//! version of this one.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::clock::{Clock, SystemClock};

/// Rate limit configuration
///
/// Supplied by the calling operation per check; nothing here is stored
/// per bucket.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Compose the bucket key for an operation and client identity
///
/// Operation names are stable strings per protected action, e.g.
/// `"auth:signin"` or `"applications:create"`.
pub fn bucket_key(operation: &str, identity: &str) -> String {
    format!("{operation}:{identity}")
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check and increment rate limit counter
    /// Returns (allowed, remaining_requests)
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>>;
}

/// One fixed window of observed requests
#[derive(Debug)]
struct Bucket {
    window_start_ms: i64,
    window_ms: i64,
    count: u32,
}

impl Bucket {
    fn expired(&self, now_ms: i64) -> bool {
        now_ms >= self.window_start_ms + self.window_ms
    }
}

#[derive(Debug, Default)]
struct BucketTable {
    buckets: HashMap<String, Bucket>,
    checks_since_sweep: u32,
}

/// Sweep cadence: every this many checks, drop buckets whose window has
/// elapsed so the table stays bounded in a long-running process.
const SWEEP_INTERVAL: u32 = 1024;

/// In-memory fixed-window store
///
/// Shared mutable state behind a single mutex; the read-modify-write of
/// each counter happens in one locked step, so concurrent checks for the
/// same key never lose updates. Operations never block on I/O and never
/// await. State is process-local and lost on restart.
#[derive(Debug)]
pub struct MemoryRateLimitStore<C: Clock = SystemClock> {
    table: Mutex<BucketTable>,
    clock: C,
}

impl MemoryRateLimitStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryRateLimitStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryRateLimitStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            table: Mutex::new(BucketTable::default()),
            clock,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BucketTable> {
        // Counter state is still consistent if a holder panicked
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_sync(&self, key: &str, config: &RateLimitConfig) -> RateLimitResult {
        let now_ms = self.clock.now_ms();
        let window_ms = config.window_ms();
        let mut table = self.lock();

        table.checks_since_sweep += 1;
        if table.checks_since_sweep >= SWEEP_INTERVAL {
            table.checks_since_sweep = 0;
            table.buckets.retain(|_, b| !b.expired(now_ms));
        }

        let bucket = table.buckets.get_mut(key);
        match bucket {
            Some(bucket) if !bucket.expired(now_ms) => {
                bucket.count += 1;
                RateLimitResult {
                    allowed: bucket.count <= config.max_requests,
                    remaining: config.max_requests.saturating_sub(bucket.count),
                    reset_at_ms: bucket.window_start_ms + bucket.window_ms,
                }
            }
            _ => {
                // Lazily created, or reset because the window elapsed
                table.buckets.insert(
                    key.to_string(),
                    Bucket {
                        window_start_ms: now_ms,
                        window_ms,
                        count: 1,
                    },
                );
                RateLimitResult {
                    allowed: true,
                    remaining: config.max_requests.saturating_sub(1),
                    reset_at_ms: now_ms + window_ms,
                }
            }
        }
    }

    /// Drop all buckets whose window has elapsed; returns how many
    pub fn evict_expired(&self) -> usize {
        let now_ms = self.clock.now_ms();
        let mut table = self.lock();
        let before = table.buckets.len();
        table.buckets.retain(|_, b| !b.expired(now_ms));
        before - table.buckets.len()
    }

    /// Number of tracked buckets
    pub fn len(&self) -> usize {
        self.lock().buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C> RateLimitStore for MemoryRateLimitStore<C>
where
    C: Clock + Send + Sync,
{
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.check_sync(key, config))
    }
}
