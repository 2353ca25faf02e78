//! Gleaner Server - REST API over the harvested record store
//!
//! This crate provides an HTTP API for browsing harvest results:
//!
//! - **Users**: Page through harvested users by ID cursor
//! - **Repos**: List one user's repositories, filtered by description or language
//! - **Health**: Server and store status
//!
//! # API Documentation
//!
//! When running the server, interactive API documentation is available
//! at `/swagger-ui`.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use router::create_router;
pub use state::AppState;
