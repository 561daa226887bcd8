//! Document-store repository trait.
//!
//! The dashboard only ever reads whole collections: no filters, no
//! projections, no pagination. Each fetch returns the raw documents; turning
//! them into validated records is the service layer's job.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{PoseDocument, VideoDocument};

/// Default collection holding scraped pose documents.
pub const POSES_COLLECTION: &str = "poses";
/// Default collection holding crawled video metadata.
pub const VIDEOS_COLLECTION: &str = "pilates_videos";

/// Read-only access to the pose and video collections.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so one instance can be shared by all
/// request handlers.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store answered
    /// - `Ok(false)` if it is known to be unavailable
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Fetch every document of the poses collection.
    async fn fetch_poses(&self) -> RepositoryResult<Vec<PoseDocument>>;

    /// Fetch every document of the videos collection.
    async fn fetch_videos(&self) -> RepositoryResult<Vec<VideoDocument>>;

    /// Short backend name used in logs and health reports.
    fn backend_name(&self) -> &'static str;

    /// Release the underlying client. Called once when the server stops.
    async fn shutdown(&self) -> RepositoryResult<()> {
        Ok(())
    }
}
