//! Gleaner DB - SQLite persistence layer for harvested records
//!
//! This crate implements the `gleaner-core` [`RecordStore`] trait on top
//! of SQLite, giving the harvester a single-file, zero-setup database
//! with idempotent writes and cursor-friendly reads.
//!
//! # Overview
//!
//! The main component is:
//! - [`SqliteStore`] - Pooled SQLite store that bootstraps its schema on open
//!
//! [`RecordStore`]: gleaner_core::traits::RecordStore

mod sql;
mod store;

pub use store::SqliteStore;
