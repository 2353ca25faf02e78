//! Configuration types for gleaner components.
//!
//! Defaults live here; the binaries layer CLI arguments and environment
//! variables on top of them.

use std::time::Duration;

// =============================================================================
// Database Configuration
// =============================================================================

/// Database connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub max_connections: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self { max_connections: 5 }
    }
}

// =============================================================================
// HTTP Configuration
// =============================================================================

/// HTTP client configuration for catalog API calls.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Per-request timeout, applied to every attempt.
    pub timeout: Duration,
    /// Maximum attempts for transient server failures.
    pub max_retries: u32,
    /// Base delay between retries (doubles on each attempt).
    pub retry_base_delay: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl HttpConfig {
    /// Creates a new HttpConfig with a custom per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates a new HttpConfig with a custom retry budget.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Creates a new HttpConfig with a custom base retry delay.
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}

// =============================================================================
// Harvest Configuration
// =============================================================================

/// Harvest pipeline configuration.
///
/// TODO(config): Support CLI arg `--concurrency` once a second catalog with
/// different rate limits needs tuning; the default matches the upstream
/// allowance today.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Number of concurrent repo fetch tasks.
    pub concurrency: usize,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self { concurrency: 10 }
    }
}

impl HarvestConfig {
    /// Creates a new HarvestConfig with custom fan-out concurrency.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}
