//! Harvest pipeline for the remote catalog.
//!
//! This module provides the core business logic for harvesting users and
//! their repositories from a paginated, rate-limited catalog, including
//! cursor resolution, concurrent repo fan-out, and persistence.
//!
//! # Architecture
//!
//! The [`HarvestService`] is generic over two traits:
//! - [`RecordStore`] - for persistence and cursor lookup
//! - [`CatalogClient`] - for fetching pages from the remote catalog
//!
//! This enables:
//! - **Testing**: Mock implementations for unit tests
//! - **Flexibility**: Different backends behind the same pipeline
//! - **Decoupling**: Core logic independent of sqlx and reqwest
//!
//! # Pipeline
//!
//! One pass per call:
//! 1. Resolve the resume cursor (highest stored user ID, 0 when empty).
//! 2. Fetch a single page of users past the cursor. An empty page ends the
//!    pass with zero counts.
//! 3. Persist users sequentially, in page order. A failed upsert skips that
//!    user's repo fetch only.
//! 4. Fan out one repo fetch per stored user, bounded by
//!    [`HarvestConfig::concurrency`]; each repo is persisted as parsed.
//! 5. Join the full set, then summarize through the reporter exactly once.
//!
//! # Cancellation Support
//!
//! [`run_cancellable`](HarvestService::run_cancellable) accepts a
//! `CancellationToken` for graceful shutdown. On cancellation the pipeline
//! stops issuing new requests, drops in-flight fetches, keeps everything
//! already persisted, and returns a result with
//! [`HarvestStatus::Cancelled`](crate::stats::HarvestStatus::Cancelled).
//!
//! # Example
//!
//! ```ignore
//! use gleaner_core::harvest::HarvestService;
//! use gleaner_core::progress::ConsoleReporter;
//!
//! let service = HarvestService::new(store, client);
//! let result = service.run(&ConsoleReporter::new(1)).await?;
//! println!("stored {} users", result.stats.users);
//! ```

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::config::HarvestConfig;
use crate::error::AppError;
use crate::models::User;
use crate::progress::{HarvestedEntity, ProgressReporter};
use crate::stats::{AtomicHarvestStats, HarvestOutcome, HarvestResult, HarvestStats};
use crate::traits::{CatalogClient, RecordStore};

/// Service for harvesting a remote catalog into a record store.
///
/// # Type Parameters
///
/// * `S` - Record store implementation (e.g., `SqliteStore`)
/// * `C` - Catalog client implementation (e.g., `ForgeClient`)
#[derive(Clone)]
pub struct HarvestService<S, C>
where
    S: RecordStore,
    C: CatalogClient,
{
    store: S,
    client: C,
    config: HarvestConfig,
}

impl<S, C> HarvestService<S, C>
where
    S: RecordStore,
    C: CatalogClient,
{
    /// Creates a new harvest service with default configuration.
    ///
    /// # Arguments
    ///
    /// * `store` - Record store for persistence and cursor lookup
    /// * `client` - Catalog client for remote fetches
    pub fn new(store: S, client: C) -> Self {
        Self {
            store,
            client,
            config: HarvestConfig::default(),
        }
    }

    /// Creates a harvest service with custom configuration.
    pub fn with_config(store: S, client: C, config: HarvestConfig) -> Self {
        Self {
            store,
            client,
            config,
        }
    }

    /// Runs one harvest pass.
    ///
    /// Resolves the cursor, fetches one page of users, persists them, and
    /// fans out their repo fetches. Re-running resumes past the users
    /// stored by previous passes.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor cannot be read or the user page
    /// fetch fails fatally. Per-item failures (one user's repos, one
    /// upsert) are logged, counted, and do not abort the pass.
    pub async fn run<R: ProgressReporter>(&self, reporter: &R) -> Result<HarvestResult, AppError> {
        self.run_cancellable(
            reporter,
            CancellationToken::new(), // never cancelled
        )
        .await
    }

    /// Runs one harvest pass with cancellation support.
    ///
    /// Same as [`run`](Self::run), but accepts a `CancellationToken` for
    /// graceful shutdown. The token is checked before every fetch and
    /// upsert; once it fires, in-flight fetches are dropped rather than
    /// awaited and the result carries the partial counts.
    ///
    /// The reporter's `summarize` is called exactly once on every
    /// completed, cancelled, or empty path.
    pub async fn run_cancellable<R: ProgressReporter>(
        &self,
        reporter: &R,
        cancel_token: CancellationToken,
    ) -> Result<HarvestResult, AppError> {
        // Check cancellation before touching store or network.
        if cancel_token.is_cancelled() {
            let result = HarvestResult::cancelled(HarvestStats::default());
            reporter.summarize(&result.stats);
            return Ok(result);
        }

        let cursor = self.store.last_user_id().await?;
        tracing::info!(cursor, "Starting harvest pass");

        let page = self.client.list_users_since(cursor).await?;

        if cancel_token.is_cancelled() {
            let result = HarvestResult::cancelled(HarvestStats::default());
            reporter.summarize(&result.stats);
            return Ok(result);
        }

        if page.is_empty() {
            tracing::info!(cursor, "No users past the cursor (catalog up to date)");
            let result = HarvestResult::completed(HarvestStats::default());
            reporter.summarize(&result.stats);
            return Ok(result);
        }

        let stats = Arc::new(AtomicHarvestStats::new());

        // Users persist sequentially, in page order. A user whose upsert
        // fails gets no repo fetch; the rest of the page is unaffected.
        let mut stored_users: Vec<User> = Vec::with_capacity(page.len());
        for user in page {
            if cancel_token.is_cancelled() {
                break;
            }
            match self.store.upsert_user(&user).await {
                Ok(()) => {
                    stats.record(HarvestOutcome::User);
                    reporter.observe(HarvestedEntity::User(&user));
                    stored_users.push(user);
                }
                Err(e) => {
                    tracing::warn!(
                        user_id = user.id,
                        login = %user.login,
                        error = %e,
                        "Failed to store user, skipping its repos"
                    );
                    stats.record(HarvestOutcome::Failed);
                }
            }
        }

        if cancel_token.is_cancelled() {
            let result = HarvestResult::cancelled(stats.to_stats());
            tracing::info!(
                processed = result.stats.total(),
                "Harvest cancelled - partial progress saved"
            );
            reporter.summarize(&result.stats);
            return Ok(result);
        }

        // One repo fetch per stored user, at most `concurrency` in flight.
        // The pass waits for the full set; there is no fail-fast.
        let fan_out = async {
            // Items move into their futures: iterating by reference makes
            // rustc reject the future as non-Send at spawn sites (the
            // `&User` closure argument trips its higher-ranked lifetime
            // check).
            let mut fetches = stream::iter(stored_users)
                .map(|user| {
                    let stats = Arc::clone(&stats);
                    let cancel_token = cancel_token.clone();
                    async move {
                        if cancel_token.is_cancelled() {
                            return;
                        }
                        self.harvest_repos(&user, reporter, &stats).await;
                    }
                })
                .buffer_unordered(self.config.concurrency);

            while fetches.next().await.is_some() {}
        };

        // Dropping the fan-out on cancellation drops in-flight fetches;
        // repos already upserted stay persisted.
        let was_cancelled = tokio::select! {
            _ = fan_out => false,
            _ = cancel_token.cancelled() => true,
        };

        let final_stats = stats.to_stats();
        let result = if was_cancelled {
            tracing::info!(
                processed = final_stats.total(),
                "Harvest cancelled - partial progress saved"
            );
            HarvestResult::cancelled(final_stats)
        } else {
            tracing::info!(
                users = final_stats.users,
                repos = final_stats.repos,
                failed = final_stats.failed,
                "Harvest pass completed"
            );
            HarvestResult::completed(final_stats)
        };
        reporter.summarize(&result.stats);
        Ok(result)
    }

    /// Fetches and persists one user's repositories.
    ///
    /// Failures are logged and counted; they never propagate, so one bad
    /// user cannot abort the sibling fetches.
    async fn harvest_repos<R: ProgressReporter>(
        &self,
        user: &User,
        reporter: &R,
        stats: &AtomicHarvestStats,
    ) {
        let repos = match self.client.list_repos(&user.login).await {
            Ok(repos) => repos,
            Err(e) => {
                tracing::warn!(
                    login = %user.login,
                    error = %e,
                    "Failed to fetch repos, skipping user"
                );
                stats.record(HarvestOutcome::Failed);
                return;
            }
        };

        // Each repo is persisted as parsed, not batched.
        for repo in repos {
            match self.store.upsert_repo(&repo).await {
                Ok(()) => {
                    stats.record(HarvestOutcome::Repo);
                    reporter.observe(HarvestedEntity::Repo(&repo));
                }
                Err(e) => {
                    tracing::warn!(
                        repo_id = repo.id,
                        name = %repo.name,
                        error = %e,
                        "Failed to store repo"
                    );
                    stats.record(HarvestOutcome::Failed);
                }
            }
        }
    }
}
