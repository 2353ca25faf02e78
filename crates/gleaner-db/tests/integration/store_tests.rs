//! Integration tests for SqliteStore.
//!
//! These tests verify the store against real SQLite databases: upsert
//! idempotence, schema constraints, selection rendering, and the resume
//! cursor derived from stored IDs.

use gleaner_core::traits::RecordStore;
use gleaner_core::{AppError, Condition, Selection, SortOrder};
use gleaner_db::SqliteStore;
use pretty_assertions::assert_eq;

use crate::integration::common::{file_store, sample_repo, sample_user, store_path};

/// Test 1: Verify insertion and retrieval of a new user
#[tokio::test]
async fn test_upsert_insert_new_user() {
    let store = SqliteStore::in_memory().await.expect("store should open");

    let user = sample_user(1, "mojombo");
    store
        .upsert_user(&user)
        .await
        .expect("upsert should succeed");

    let retrieved = store
        .get_user(&Selection::new().filter(Condition::equals("id", 1)))
        .await
        .expect("get should succeed")
        .expect("user should exist");
    assert_eq!(retrieved, user);
}

/// Test 2: Verify ON CONFLICT replaces an existing user instead of duplicating it
#[tokio::test]
async fn test_upsert_replaces_existing_user() {
    let store = SqliteStore::in_memory().await.expect("store should open");

    store
        .upsert_user(&sample_user(1, "mojombo"))
        .await
        .expect("first upsert should succeed");
    let renamed = sample_user(1, "mojombo-renamed");
    store
        .upsert_user(&renamed)
        .await
        .expect("second upsert should succeed");

    let count = store.count_users().await.expect("count should succeed");
    assert_eq!(count, 1, "re-upserting the same ID should not add rows");

    let retrieved = store
        .get_user(&Selection::new().filter(Condition::equals("id", 1)))
        .await
        .expect("get should succeed")
        .expect("user should exist");
    assert_eq!(retrieved, renamed);
}

/// Test 3: Verify repo insertion, nullable columns, and replacement
#[tokio::test]
async fn test_upsert_repo_round_trip_and_replacement() {
    let store = SqliteStore::in_memory().await.expect("store should open");

    store
        .upsert_user(&sample_user(1, "mojombo"))
        .await
        .expect("owner upsert should succeed");

    let repo = sample_repo(10, 1, "grit");
    store
        .upsert_repo(&repo)
        .await
        .expect("repo upsert should succeed");

    let retrieved = store
        .get_repo(&Selection::new().filter(Condition::equals("id", 10)))
        .await
        .expect("get should succeed")
        .expect("repo should exist");
    assert_eq!(retrieved, repo);

    // Replacement clears optional columns when the new row carries None.
    let mut bare = sample_repo(10, 1, "grit");
    bare.description = None;
    bare.language = None;
    store
        .upsert_repo(&bare)
        .await
        .expect("replacement upsert should succeed");

    let retrieved = store
        .get_repo(&Selection::new().filter(Condition::equals("id", 10)))
        .await
        .expect("get should succeed")
        .expect("repo should exist");
    assert_eq!(retrieved.description, None);
    assert_eq!(retrieved.language, None);

    let count = store.count_repos().await.expect("count should succeed");
    assert_eq!(count, 1);
}

/// Test 4: Verify foreign keys reject repos whose owner was never stored
#[tokio::test]
async fn test_repo_upsert_requires_stored_owner() {
    let store = SqliteStore::in_memory().await.expect("store should open");

    let err = store
        .upsert_repo(&sample_repo(10, 99, "orphan"))
        .await
        .expect_err("repo with unknown owner should be rejected");
    assert!(matches!(err, AppError::DatabaseError(_)));
}

/// Test 5: Verify the unique login index rejects a second user with the same login
#[tokio::test]
async fn test_duplicate_login_is_rejected() {
    let store = SqliteStore::in_memory().await.expect("store should open");

    store
        .upsert_user(&sample_user(1, "mojombo"))
        .await
        .expect("first upsert should succeed");
    let err = store
        .upsert_user(&sample_user(2, "mojombo"))
        .await
        .expect_err("duplicate login under a new ID should be rejected");
    assert!(matches!(err, AppError::DatabaseError(_)));
}

/// Test 6: Verify the resume cursor is 0 on an empty store
#[tokio::test]
async fn test_last_user_id_starts_at_zero() {
    let store = SqliteStore::in_memory().await.expect("store should open");

    let cursor = store.last_user_id().await.expect("cursor should load");
    assert_eq!(cursor, 0);
}

/// Test 7: Verify the resume cursor tracks the highest stored ID, not insertion order
#[tokio::test]
async fn test_last_user_id_tracks_highest_stored() {
    let store = SqliteStore::in_memory().await.expect("store should open");

    for (id, login) in [(46, "bmizerany"), (3, "pjhyett"), (17, "vanpelt")] {
        store
            .upsert_user(&sample_user(id, login))
            .await
            .expect("upsert should succeed");
    }

    let cursor = store.last_user_id().await.expect("cursor should load");
    assert_eq!(cursor, 46);
}

/// Test 8: Verify default ascending-ID ordering and explicit descending override
#[tokio::test]
async fn test_list_users_ordering() {
    let store = SqliteStore::in_memory().await.expect("store should open");

    for (id, login) in [(3, "pjhyett"), (1, "mojombo"), (2, "defunkt")] {
        store
            .upsert_user(&sample_user(id, login))
            .await
            .expect("upsert should succeed");
    }

    let ids: Vec<i64> = store
        .list_users(&Selection::new())
        .await
        .expect("list should succeed")
        .iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let ids: Vec<i64> = store
        .list_users(&Selection::new().order_by(SortOrder::desc("id")))
        .await
        .expect("list should succeed")
        .iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

/// Test 9: Verify cursor-style listing: strictly past an ID, capped by a limit
#[tokio::test]
async fn test_list_users_past_cursor_with_limit() {
    let store = SqliteStore::in_memory().await.expect("store should open");

    for id in 1..=5 {
        store
            .upsert_user(&sample_user(id, &format!("user{id}")))
            .await
            .expect("upsert should succeed");
    }

    let ids: Vec<i64> = store
        .list_users(
            &Selection::new()
                .filter(Condition::greater_than("id", 2))
                .limit(2),
        )
        .await
        .expect("list should succeed")
        .iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(ids, vec![3, 4], "the cursor bound is exclusive");
}

/// Test 10: Verify lookup by login and that a miss is None, not an error
#[tokio::test]
async fn test_get_user_by_login() {
    let store = SqliteStore::in_memory().await.expect("store should open");

    store
        .upsert_user(&sample_user(2, "defunkt"))
        .await
        .expect("upsert should succeed");

    let found = store
        .get_user(&Selection::new().filter(Condition::equals("login", "defunkt")))
        .await
        .expect("get should succeed");
    assert_eq!(found.map(|u| u.id), Some(2));

    let missing = store
        .get_user(&Selection::new().filter(Condition::equals("login", "nobody")))
        .await
        .expect("get should succeed");
    assert_eq!(missing, None);
}

/// Test 11: Verify repo listings AND-combine owner, language, and description filters
#[tokio::test]
async fn test_list_repos_combines_filters() {
    let store = SqliteStore::in_memory().await.expect("store should open");

    store
        .upsert_user(&sample_user(1, "mojombo"))
        .await
        .expect("owner upsert should succeed");
    store
        .upsert_user(&sample_user(2, "defunkt"))
        .await
        .expect("owner upsert should succeed");

    let mut grit = sample_repo(10, 1, "grit");
    grit.language = Some("Ruby".to_string());
    grit.description = Some("Grit is a library for git repositories".to_string());
    let mut merb = sample_repo(11, 1, "merb-core");
    merb.language = Some("Ruby".to_string());
    merb.description = Some("Merb Core: lightweight framework".to_string());
    let mut exception_logger = sample_repo(12, 2, "exception_logger");
    exception_logger.language = Some("Ruby".to_string());
    exception_logger.description = Some("Logs exceptions to git-backed storage".to_string());
    for repo in [&grit, &merb, &exception_logger] {
        store
            .upsert_repo(repo)
            .await
            .expect("repo upsert should succeed");
    }

    let ids: Vec<i64> = store
        .list_repos(
            &Selection::new()
                .filter(Condition::equals("owner_id", 1))
                .filter(Condition::equals("language", "Ruby"))
                .filter(Condition::contains("description", "git")),
        )
        .await
        .expect("list should succeed")
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![10], "all three filters must hold at once");
}

/// Test 12: Verify substring filters match LIKE wildcard characters literally
#[tokio::test]
async fn test_contains_matches_wildcards_literally() {
    let store = SqliteStore::in_memory().await.expect("store should open");

    store
        .upsert_user(&sample_user(1, "mojombo"))
        .await
        .expect("owner upsert should succeed");

    let mut percent = sample_repo(10, 1, "progress");
    percent.description = Some("tracker stuck at 50% complete".to_string());
    let mut no_percent = sample_repo(11, 1, "progress-plain");
    no_percent.description = Some("tracker stuck at 50 percent".to_string());
    let mut underscore = sample_repo(12, 1, "snake");
    underscore.description = Some("uses snake_case names".to_string());
    let mut no_underscore = sample_repo(13, 1, "snakeless");
    no_underscore.description = Some("uses snakeXcase names".to_string());
    for repo in [&percent, &no_percent, &underscore, &no_underscore] {
        store
            .upsert_repo(repo)
            .await
            .expect("repo upsert should succeed");
    }

    let ids: Vec<i64> = store
        .list_repos(&Selection::new().filter(Condition::contains("description", "50%")))
        .await
        .expect("list should succeed")
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![10], "'%' must not act as a wildcard");

    let ids: Vec<i64> = store
        .list_repos(&Selection::new().filter(Condition::contains("description", "snake_case")))
        .await
        .expect("list should succeed")
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![12], "'_' must not act as a wildcard");
}

/// Test 13: Verify limit plus offset pages through rows in order
#[tokio::test]
async fn test_limit_and_offset_page_results() {
    let store = SqliteStore::in_memory().await.expect("store should open");

    for id in 1..=5 {
        store
            .upsert_user(&sample_user(id, &format!("user{id}")))
            .await
            .expect("upsert should succeed");
    }

    let ids: Vec<i64> = store
        .list_users(&Selection::new().limit(2).offset(2))
        .await
        .expect("list should succeed")
        .iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(ids, vec![3, 4]);
}

/// Test 14: Verify an offset without a limit is ignored
#[tokio::test]
async fn test_offset_without_limit_returns_all() {
    let store = SqliteStore::in_memory().await.expect("store should open");

    for id in 1..=5 {
        store
            .upsert_user(&sample_user(id, &format!("user{id}")))
            .await
            .expect("upsert should succeed");
    }

    let users = store
        .list_users(&Selection::new().offset(3))
        .await
        .expect("list should succeed");
    assert_eq!(users.len(), 5);
}

/// Test 15: Verify rows written through one handle are visible through another
#[tokio::test]
async fn test_reopen_sees_persisted_rows() {
    let (store, dir) = file_store().await;

    store
        .upsert_user(&sample_user(1, "mojombo"))
        .await
        .expect("upsert should succeed");

    let reopened = SqliteStore::open(store_path(&dir))
        .await
        .expect("reopen should succeed");
    let retrieved = reopened
        .get_user(&Selection::new().filter(Condition::equals("login", "mojombo")))
        .await
        .expect("get should succeed")
        .expect("user should persist across handles");
    assert_eq!(retrieved.id, 1);
}

/// Test 16: Verify concurrent upserts from separate tasks all commit
#[tokio::test]
async fn test_concurrent_upserts_all_commit() {
    let (store, _dir) = file_store().await;

    let mut handles = Vec::new();
    for id in 1..=8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.upsert_user(&sample_user(id, &format!("user{id}"))).await
        }));
    }
    for handle in handles {
        handle
            .await
            .expect("task should not panic")
            .expect("upsert should succeed");
    }

    let count = store.count_users().await.expect("count should succeed");
    assert_eq!(count, 8);
}

/// Test 17: Verify the health check runs against a live pool
#[tokio::test]
async fn test_health_check_reports_ok() {
    let store = SqliteStore::in_memory().await.expect("store should open");
    store.health_check().await.expect("health check should pass");
}
