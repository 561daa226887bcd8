//! Document store access.
//!
//! This module provides abstractions for reading the pose and video
//! collections via the Repository pattern, allowing different storage
//! backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (dashboard services, REST API)       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Full-collection loads                                │
//! │  - Per-document validation and skipping                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                │
//! ┌───▼──────────────┐     ┌───────────▼─────────────┐
//! │ Mongo Repository │     │ Local Repository        │
//! │ (mongodb driver) │     │ (in-memory, JSON seed)  │
//! └──────────────────┘     └─────────────────────────┘
//! ```
//!
//! There is no process-wide connection: build one repository with
//! [`RepositoryFactory`] and pass it to whatever needs it.

// Feature flag priority: mongo > local
#[cfg(not(any(feature = "mongo-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

#[cfg(feature = "mongo-repo")]
pub use repositories::{MongoConfig, MongoRepository, QueryStats};
#[cfg(not(feature = "mongo-repo"))]
#[derive(Debug, Clone)]
pub struct MongoConfig {
    _private: (),
}

pub use services::{health_check, load_poses, load_videos};

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::{LocalRepository, SeedData};
pub use repository::{
    DocumentRepository, ErrorContext, RepositoryError, RepositoryResult, POSES_COLLECTION,
    VIDEOS_COLLECTION,
};
