//! Response DTOs for API endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use gleaner_core::{Repo, User};

// =============================================================================
// Health
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("healthy" or "degraded")
    pub status: String,
    /// Server version
    pub version: String,
    /// Store connectivity status
    pub database: ServiceStatus,
}

/// Status of an individual service component.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    /// Whether the service is reachable
    pub healthy: bool,
    /// Optional message (e.g., error details)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// =============================================================================
// Users
// =============================================================================

/// Harvested user response.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// Catalog-assigned user ID
    pub id: i64,
    /// Unique display name
    pub login: String,
    /// Canonical profile URL
    pub url: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            login: user.login,
            url: user.url,
        }
    }
}

// =============================================================================
// Repos
// =============================================================================

/// Harvested repository response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RepoResponse {
    /// Catalog-assigned repository ID
    pub id: i64,
    /// ID of the owning user
    pub owner_id: i64,
    /// Canonical repository URL
    pub url: String,
    /// Repository name
    pub name: String,
    /// Free-text description, if the catalog had one
    pub description: Option<String>,
    /// Dominant language label, if the catalog had one
    pub language: Option<String>,
}

impl From<Repo> for RepoResponse {
    fn from(repo: Repo) -> Self {
        Self {
            id: repo.id,
            owner_id: repo.owner_id,
            url: repo.url,
            name: repo.name,
            description: repo.description,
            language: repo.language,
        }
    }
}
