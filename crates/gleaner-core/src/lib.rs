//! Gleaner Core - Domain types, business logic, and services.
//!
//! This crate provides the core functionality for Gleaner, including:
//!
//! - **Domain models**: [`User`], [`Repo`]
//! - **Query building**: [`Selection`] and [`Condition`] for filtered,
//!   ordered, paginated store reads
//! - **Services**: [`HarvestService`] for incremental catalog harvesting
//! - **Traits**: [`RecordStore`], [`CatalogClient`] for dependency injection
//! - **Progress reporting**: [`ProgressReporter`] trait for decoupled output
//!
//! # Architecture
//!
//! This crate is designed to be reusable by different frontends (CLI,
//! server, etc.). Business logic is decoupled from I/O concerns through
//! traits:
//!
//! - [`RecordStore`] - abstracts persistence (e.g., SQLite via `gleaner-db`)
//! - [`CatalogClient`] - abstracts the remote catalog (e.g., `gleaner-client`)
//!
//! # Example
//!
//! ```ignore
//! use gleaner_core::HarvestService;
//! use gleaner_core::progress::ConsoleReporter;
//!
//! // Create the service with your implementations
//! let harvest = HarvestService::new(store, client);
//! let result = harvest.run(&ConsoleReporter::new(1)).await?;
//! println!("stored {} users and {} repos", result.stats.users, result.stats.repos);
//! ```

pub mod config;
pub mod error;
pub mod harvest;
pub mod models;
pub mod progress;
pub mod query;
pub mod stats;
pub mod traits;

// Configuration
pub use config::{DbConfig, HarvestConfig, HttpConfig};

// Error handling
pub use error::AppError;

// Domain models
pub use models::{Repo, User};

// Query building
pub use query::{Condition, Scalar, Selection, SortOrder};

// Run statistics
pub use stats::{
    AtomicHarvestStats, HarvestOutcome, HarvestResult, HarvestStats, HarvestStatus,
};

// Progress reporting
pub use progress::{ConsoleReporter, HarvestedEntity, ProgressReporter, SilentReporter};

// Traits for dependency injection
pub use traits::{CatalogClient, RecordStore};

// Services (generic over trait implementations)
pub use harvest::HarvestService;
