//! Trait definitions for external dependencies.
//!
//! This module defines traits that abstract over external dependencies
//! (the record store, the catalog client), enabling:
//!
//! - **Testability**: Mock implementations for unit testing
//! - **Flexibility**: Different backend implementations behind the same seam
//! - **Decoupling**: The harvest pipeline doesn't depend on sqlx or reqwest
//!
//! # Example
//!
//! ```
//! use gleaner_core::traits::RecordStore;
//! use gleaner_core::{AppError, Selection, User};
//!
//! // Business logic uses traits, not concrete types
//! async fn newest_user<S>(store: &S) -> Result<Option<User>, AppError>
//! where
//!     S: RecordStore,
//! {
//!     use gleaner_core::SortOrder;
//!     store
//!         .get_user(&Selection::new().order_by(SortOrder::desc("id")))
//!         .await
//! }
//! ```

use std::future::Future;

use crate::{AppError, Repo, Selection, User};

/// Store for harvested record persistence and retrieval.
///
/// Implementations must be safe to share across concurrent upserts; each
/// upsert commits independently, so two simultaneous writes to different
/// IDs never interfere.
pub trait RecordStore: Send + Sync + Clone {
    /// Inserts or fully replaces a user, keyed by its ID.
    ///
    /// Upserting the same ID twice leaves a single row holding the most
    /// recently written values.
    fn upsert_user(&self, user: &User) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Inserts or fully replaces a repo, keyed by its own ID.
    fn upsert_repo(&self, repo: &Repo) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Retrieves the first user matching the selection.
    ///
    /// Honors the selection's ordering (default: ascending ID) and returns
    /// `None` when nothing matches; absence is not an error at this layer.
    fn get_user(
        &self,
        selection: &Selection,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    /// Retrieves the first repo matching the selection.
    fn get_repo(
        &self,
        selection: &Selection,
    ) -> impl Future<Output = Result<Option<Repo>, AppError>> + Send;

    /// Lists users matching the selection.
    ///
    /// Conditions AND-combine; ordering defaults to ascending ID; `limit`
    /// caps the result and `offset` skips rows only when a limit is set.
    fn list_users(
        &self,
        selection: &Selection,
    ) -> impl Future<Output = Result<Vec<User>, AppError>> + Send;

    /// Lists repos matching the selection.
    fn list_repos(
        &self,
        selection: &Selection,
    ) -> impl Future<Output = Result<Vec<Repo>, AppError>> + Send;

    /// Returns the highest stored user ID, or 0 when the store is empty.
    ///
    /// This is the resume cursor: the next harvest pass asks the catalog
    /// for users with IDs strictly greater than it.
    fn last_user_id(&self) -> impl Future<Output = Result<i64, AppError>> + Send;
}

/// Read access to the remote catalog.
///
/// Implementations own retry, backoff, and rate-limit suspension; an error
/// escaping these methods is fatal for the requested page or item.
pub trait CatalogClient: Send + Sync + Clone {
    /// Fetches one page of users with IDs strictly greater than `since`.
    ///
    /// # Arguments
    ///
    /// * `since` - The resume cursor; 0 starts from the beginning
    ///
    /// # Returns
    ///
    /// One remote-sized page in ascending ID order. An empty page means
    /// the catalog has nothing past the cursor.
    fn list_users_since(
        &self,
        since: i64,
    ) -> impl Future<Output = Result<Vec<User>, AppError>> + Send;

    /// Fetches all repositories owned by `login`.
    fn list_repos(&self, login: &str) -> impl Future<Output = Result<Vec<Repo>, AppError>> + Send;
}
