//! Request DTOs for API endpoints.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Query parameters for the paged user listing.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct UsersQuery {
    /// Only return users with IDs strictly greater than this (default: 0)
    #[param(example = 46)]
    pub since: Option<i64>,
}

/// Query parameters for a user's repository listing.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ReposQuery {
    /// Substring filter on the repository description
    #[param(example = "scraper")]
    pub description: Option<String>,

    /// Substring filter on the dominant language
    #[param(example = "Rust")]
    pub language: Option<String>,
}
