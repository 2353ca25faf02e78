//! Shared helpers for server route tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use gleaner_core::{Repo, User};
use gleaner_db::SqliteStore;
use gleaner_server::{AppState, create_router};

/// A router over a fresh in-memory store, plus a handle for seeding it.
///
/// The handle shares the router's pool, so rows upserted through it are
/// visible to the handlers immediately.
pub async fn empty_router() -> (Router, SqliteStore) {
    let store = SqliteStore::in_memory()
        .await
        .expect("in-memory store opens");
    let router = create_router(AppState::new(store.clone()));

    (router, store)
}

/// One GET against the router; returns the status and the parsed body.
///
/// An empty body parses as JSON null so status-only assertions stay easy.
pub async fn get(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request handled");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body read")
        .to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };

    (status, json)
}

pub fn user(id: i64, login: &str) -> User {
    User {
        id,
        login: login.to_string(),
        url: format!("https://github.com/{login}"),
    }
}

pub fn repo(
    id: i64,
    owner_id: i64,
    name: &str,
    description: Option<&str>,
    language: Option<&str>,
) -> Repo {
    Repo {
        id,
        owner_id,
        url: format!("https://github.com/owner{owner_id}/{name}"),
        name: name.to_string(),
        description: description.map(String::from),
        language: language.map(String::from),
    }
}
