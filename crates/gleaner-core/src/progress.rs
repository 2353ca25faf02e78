//! Progress reporting for harvest passes.
//!
//! Reporters receive one [`ProgressReporter::observe`] call per persisted
//! entity and a single [`ProgressReporter::summarize`] call when the pass
//! ends. Reporting must never fail a harvest: implementations swallow
//! output errors.

use std::io::Write;

use crate::models::{Repo, User};
use crate::stats::HarvestStats;

/// An entity that was just persisted, borrowed for the callback.
#[derive(Debug, Clone, Copy)]
pub enum HarvestedEntity<'a> {
    User(&'a User),
    Repo(&'a Repo),
}

/// Trait for observing harvest progress.
pub trait ProgressReporter: Send + Sync {
    /// Called after each entity is persisted.
    ///
    /// The default implementation does nothing (silent mode).
    fn observe(&self, entity: HarvestedEntity<'_>) {
        let _ = entity;
    }

    /// Called exactly once when the pass ends, completed or cancelled.
    fn summarize(&self, stats: &HarvestStats) {
        let _ = stats;
    }
}

/// Reporter that ignores all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}

/// Stdout reporter driven by a verbosity level.
///
/// - `0`: silent.
/// - `1`: one character per entity (`u` for a user, `r` for a repo), flushed
///   without a newline, followed by a one-line summary.
/// - `2`: the debug representation of each entity on its own line, followed
///   by the summary.
///
/// Progress goes to stdout; diagnostics stay on stderr via `tracing`.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    verbosity: u8,
}

impl ConsoleReporter {
    /// Creates a reporter for the given verbosity level.
    pub fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }

    fn write_flushed(text: &str) {
        let mut out = std::io::stdout();
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }
}

impl ProgressReporter for ConsoleReporter {
    fn observe(&self, entity: HarvestedEntity<'_>) {
        match self.verbosity {
            0 => {}
            1 => {
                let tally = match entity {
                    HarvestedEntity::User(_) => "u",
                    HarvestedEntity::Repo(_) => "r",
                };
                Self::write_flushed(tally);
            }
            _ => {
                let line = match entity {
                    HarvestedEntity::User(user) => format!("{user:?}\n"),
                    HarvestedEntity::Repo(repo) => format!("{repo:?}\n"),
                };
                Self::write_flushed(&line);
            }
        }
    }

    fn summarize(&self, stats: &HarvestStats) {
        if self.verbosity == 0 {
            return;
        }
        // The leading newline terminates the tally line.
        Self::write_flushed(&format!(
            "\nFetched {} users and {} repos\n",
            stats.users, stats.repos
        ));
    }
}
