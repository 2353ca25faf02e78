//! Run statistics for harvest passes.
//!
//! This module provides the per-run counters and terminal status shared
//! between the harvest pipeline and its callers, decoupled from I/O.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Outcome of handling a single entity during a harvest pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestOutcome {
    /// A user record was persisted.
    User,
    /// A repo record was persisted.
    Repo,
    /// Fetching or persisting an entity failed.
    Failed,
}

/// Statistics for one harvest pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HarvestStats {
    pub users: usize,
    pub repos: usize,
    pub failed: usize,
}

impl HarvestStats {
    /// Creates a new empty stats tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an outcome, incrementing the appropriate counter.
    pub fn record(&mut self, outcome: HarvestOutcome) {
        match outcome {
            HarvestOutcome::User => self.users += 1,
            HarvestOutcome::Repo => self.repos += 1,
            HarvestOutcome::Failed => self.failed += 1,
        }
    }

    /// Returns the total number of handled entities.
    pub fn total(&self) -> usize {
        self.users + self.repos + self.failed
    }

    /// Returns the number of successfully persisted entities.
    pub fn successful(&self) -> usize {
        self.users + self.repos
    }
}

/// Thread-safe counters shared by the concurrent fetch tasks.
///
/// Snapshot with [`to_stats`](Self::to_stats) once the tasks have joined.
#[derive(Debug, Default)]
pub struct AtomicHarvestStats {
    users: AtomicUsize,
    repos: AtomicUsize,
    failed: AtomicUsize,
}

impl AtomicHarvestStats {
    /// Creates a new zeroed tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an outcome, incrementing the appropriate counter.
    pub fn record(&self, outcome: HarvestOutcome) {
        match outcome {
            HarvestOutcome::User => self.users.fetch_add(1, Ordering::Relaxed),
            HarvestOutcome::Repo => self.repos.fetch_add(1, Ordering::Relaxed),
            HarvestOutcome::Failed => self.failed.fetch_add(1, Ordering::Relaxed),
        };
    }

    /// Copies the counters into a plain [`HarvestStats`].
    pub fn to_stats(&self) -> HarvestStats {
        HarvestStats {
            users: self.users.load(Ordering::Relaxed),
            repos: self.repos.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Terminal state of a harvest pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestStatus {
    /// The pass ran to completion.
    Completed,
    /// The pass was interrupted; partial progress is persisted.
    Cancelled,
}

impl HarvestStatus {
    /// Returns the string representation for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            HarvestStatus::Completed => "completed",
            HarvestStatus::Cancelled => "cancelled",
        }
    }
}

/// Statistics plus how the pass ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestResult {
    pub stats: HarvestStats,
    pub status: HarvestStatus,
}

impl HarvestResult {
    /// Wraps stats for a pass that ran to completion.
    pub fn completed(stats: HarvestStats) -> Self {
        Self {
            stats,
            status: HarvestStatus::Completed,
        }
    }

    /// Wraps stats for an interrupted pass.
    pub fn cancelled(stats: HarvestStats) -> Self {
        Self {
            stats,
            status: HarvestStatus::Cancelled,
        }
    }

    /// Returns true if the pass was interrupted.
    pub fn is_cancelled(&self) -> bool {
        self.status == HarvestStatus::Cancelled
    }
}
