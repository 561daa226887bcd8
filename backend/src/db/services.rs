//! High-level database service layer.
//!
//! Repository-agnostic loaders: they issue the full-collection read and turn
//! raw documents into validated records, dropping the ones that are missing
//! a required field.
//!
//! # Usage
//!
//! ```no_run
//! use pilates_viz::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let poses = services::load_poses(&repo).await?;
//!     println!("Loaded {} poses", poses.len());
//!     Ok(())
//! }
//! ```

use log::info;

use super::repository::{
    DocumentRepository, RepositoryResult, POSES_COLLECTION, VIDEOS_COLLECTION,
};
use crate::models::{PoseRecord, Snapshot, VideoRecord};

/// Check if the document store is reachable.
pub async fn health_check<R: DocumentRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Read the whole poses collection and validate it.
pub async fn load_poses<R: DocumentRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Snapshot<PoseRecord>> {
    let documents = repo.fetch_poses().await?;
    let snapshot = Snapshot::from_documents(POSES_COLLECTION, documents);
    info!(
        "Loaded {} pose records from {} ({} skipped)",
        snapshot.len(),
        repo.backend_name(),
        snapshot.skipped
    );
    Ok(snapshot)
}

/// Read the whole videos collection and validate it.
pub async fn load_videos<R: DocumentRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Snapshot<VideoRecord>> {
    let documents = repo.fetch_videos().await?;
    let snapshot = Snapshot::from_documents(VIDEOS_COLLECTION, documents);
    info!(
        "Loaded {} video records from {} ({} skipped)",
        snapshot.len(),
        repo.backend_name(),
        snapshot.skipped
    );
    Ok(snapshot)
}
