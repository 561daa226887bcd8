//! Repository trait definitions for the document store.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`documents`]: Read access to the pose and video collections

pub mod documents;
pub mod error;

pub use documents::{DocumentRepository, POSES_COLLECTION, VIDEOS_COLLECTION};
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
