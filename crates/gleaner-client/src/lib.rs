//! Gleaner Client - HTTP client for the forge catalog
//!
//! This crate provides the HTTP side of harvesting:
//!
//! - [`forge`] - Forge catalog API (paged users, per-user repositories)
//!
//! # Overview
//!
//! The client handles request building, response parsing, transient-failure
//! retries, and rate-limit suspension, so callers only ever see a parsed
//! payload or a fatal error.

pub mod forge;

// Re-export main client type
pub use forge::ForgeClient;
