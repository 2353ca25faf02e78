//! Domain models for harvested catalog records.
//!
//! Identifiers are assigned by the remote catalog and reused verbatim;
//! the harvester never invents IDs. Upserts key on them, so replaying a
//! page rewrites rows in place instead of duplicating them.

use serde::{Deserialize, Serialize};

/// A harvested user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Catalog-assigned ID, monotonically increasing on the remote side.
    /// The highest stored value is the resume cursor.
    pub id: i64,
    /// Unique display name.
    pub login: String,
    /// Canonical profile URL.
    pub url: String,
}

/// A repository owned by exactly one [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Repo {
    /// Catalog-assigned ID.
    pub id: i64,
    /// ID of the owning user.
    pub owner_id: i64,
    /// Canonical repository URL.
    pub url: String,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
}
