//! User and repository listing endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use gleaner_core::traits::RecordStore;
use gleaner_core::{Condition, Selection, User};

use crate::dto::{RepoResponse, ReposQuery, UserResponse, UsersQuery};
use crate::error::ApiError;
use crate::state::AppState;

/// Users returned per page; clients page by passing the last ID as `since`.
const PAGE_SIZE: u32 = 30;

/// List users in ascending ID order.
///
/// Returns one page starting after the `since` cursor; passing the last
/// ID of a page as the next `since` walks the whole store.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(UsersQuery),
    responses(
        (status = 200, description = "One page of users", body = [UserResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<UsersQuery>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let since = params.since.unwrap_or(0);
    let selection = Selection::new()
        .filter(Condition::greater_than("id", since))
        .limit(PAGE_SIZE);

    let users = state
        .store
        .list_users(&selection)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a user by login.
#[utoipa::path(
    get,
    path = "/api/v1/users/{login}",
    params(
        ("login" = String, Path, description = "User login")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = find_user(&state, &login).await?;

    Ok(Json(UserResponse::from(user)))
}

/// List a user's repositories.
///
/// Optional query parameters narrow the listing by description or
/// language substring.
#[utoipa::path(
    get,
    path = "/api/v1/users/{login}/repos",
    params(
        ("login" = String, Path, description = "User login"),
        ReposQuery,
    ),
    responses(
        (status = 200, description = "The user's repositories", body = [RepoResponse]),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "users"
)]
pub async fn list_user_repos(
    State(state): State<AppState>,
    Path(login): Path<String>,
    Query(params): Query<ReposQuery>,
) -> Result<Json<Vec<RepoResponse>>, ApiError> {
    let user = find_user(&state, &login).await?;

    let mut selection = Selection::new().filter(Condition::equals("owner_id", user.id));
    if let Some(description) = &params.description {
        selection = selection.filter(Condition::contains("description", description.as_str()));
    }
    if let Some(language) = &params.language {
        selection = selection.filter(Condition::contains("language", language.as_str()));
    }

    let repos = state
        .store
        .list_repos(&selection)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(repos.into_iter().map(RepoResponse::from).collect()))
}

/// Login lookup, shared by the by-login endpoints.
///
/// Matches by substring, so the first user (by ID) whose login contains
/// the path segment wins.
async fn find_user(state: &AppState, login: &str) -> Result<User, ApiError> {
    state
        .store
        .get_user(&Selection::new().filter(Condition::contains("login", login)))
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))
}
