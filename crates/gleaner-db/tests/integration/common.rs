//! Test utilities for integration tests.
//!
//! Most tests run against a private in-memory database. Tests that need
//! persistence across handles or real cross-task write contention use a
//! file-backed store in a temporary directory instead.

use gleaner_core::{Repo, User};
use gleaner_db::SqliteStore;
use tempfile::TempDir;

/// Opens a file-backed store under a fresh temporary directory.
///
/// The database path includes a subdirectory that does not exist yet, so
/// opening also exercises parent directory creation.
///
/// # Returns
///
/// A tuple of (SqliteStore, TempDir) - keep the directory alive for the
/// test duration, dropping it deletes the database file.
pub async fn file_store() -> (SqliteStore, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let store = SqliteStore::open(store_path(&dir))
        .await
        .expect("store should open");
    (store, dir)
}

/// The database path used by [`file_store`] within `dir`.
pub fn store_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("harvest").join("data.sqlite")
}

/// Creates a sample user for testing.
pub fn sample_user(id: i64, login: &str) -> User {
    User {
        id,
        login: login.to_string(),
        url: format!("https://github.com/{login}"),
    }
}

/// Creates a sample repo owned by `owner_id`.
pub fn sample_repo(id: i64, owner_id: i64, name: &str) -> Repo {
    Repo {
        id,
        owner_id,
        url: format!("https://github.com/user{owner_id}/{name}"),
        name: name.to_string(),
        description: Some(format!("the {name} project")),
        language: Some("Rust".to_string()),
    }
}
