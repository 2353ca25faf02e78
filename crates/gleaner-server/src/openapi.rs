//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::dto::{
    HealthResponse, RepoResponse, ReposQuery, ServiceStatus, UserResponse, UsersQuery,
};
use crate::handlers::{health, users};

/// OpenAPI documentation for the Gleaner API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gleaner API",
        version = "1.0.0",
        description = "Read-only REST API over the gleaner record store.

Gleaner harvests users and their repositories from a forge catalog into
a local SQLite store; this API serves what has been harvested so far.

## Quick Start

1. Check server health: `GET /api/v1/health`
2. Page through users: `GET /api/v1/users?since=0`
3. Inspect one user's repositories: `GET /api/v1/users/mojombo/repos?language=Rust`
",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        health::health_check,
        users::list_users,
        users::get_user,
        users::list_user_repos,
    ),
    components(
        schemas(
            // Request types
            UsersQuery,
            ReposQuery,
            // Response types
            HealthResponse,
            ServiceStatus,
            UserResponse,
            RepoResponse,
        )
    ),
    tags(
        (name = "system", description = "System health"),
        (name = "users", description = "Harvested users and their repositories"),
    )
)]
pub struct ApiDoc;
