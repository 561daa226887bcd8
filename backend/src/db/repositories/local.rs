//! In-memory local repository implementation.
//!
//! Suitable for unit testing and local development. Documents live in plain
//! vectors behind a lock; the store can be pre-populated from a JSON seed
//! file shaped like a dump of the two collections:
//!
//! ```json
//! {
//!   "poses": [{ "nama_gerakan": "Hundred" }],
//!   "pilates_videos": [{ "title": "...", "channelTitle": "...", "publishedAt": "2023-01-15T10:00:00Z" }]
//! }
//! ```

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::{PoseDocument, VideoDocument};

/// Contents of a seed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub poses: Vec<PoseDocument>,
    #[serde(rename = "pilates_videos", alias = "videos", default)]
    pub videos: Vec<VideoDocument>,
}

/// In-memory local repository.
///
/// # Example
/// ```
/// use pilates_viz::db::repositories::LocalRepository;
/// use pilates_viz::models::PoseDocument;
///
/// let repo = LocalRepository::new();
/// repo.insert_poses(vec![PoseDocument::new("Hundred")]);
/// assert_eq!(repo.pose_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    poses: Vec<PoseDocument>,
    videos: Vec<VideoDocument>,
    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            poses: Vec::new(),
            videos: Vec::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `seed`.
    pub fn with_seed(seed: SeedData) -> Self {
        let repo = Self::new();
        repo.insert_poses(seed.poses);
        repo.insert_videos(seed.videos);
        repo
    }

    /// Load a JSON seed file.
    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read seed file {}: {}",
                path.display(),
                e
            ))
        })?;

        let seed: SeedData = serde_json::from_str(&content).map_err(|e| {
            RepositoryError::decode_with_context(
                e.to_string(),
                ErrorContext::new("load_seed").with_details(path.display().to_string()),
            )
        })?;

        log::info!(
            "Seeded local repository from {} ({} poses, {} videos)",
            path.display(),
            seed.poses.len(),
            seed.videos.len()
        );
        Ok(Self::with_seed(seed))
    }

    /// Append pose documents.
    pub fn insert_poses(&self, documents: impl IntoIterator<Item = PoseDocument>) {
        self.data.write().poses.extend(documents);
    }

    /// Append video documents.
    pub fn insert_videos(&self, documents: impl IntoIterator<Item = VideoDocument>) {
        self.data.write().videos.extend(documents);
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all documents from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        data.poses.clear();
        data.videos.clear();
    }

    pub fn pose_count(&self) -> usize {
        self.data.read().poses.len()
    }

    pub fn video_count(&self) -> usize {
        self.data.read().videos.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str, collection: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Document store is not healthy",
                ErrorContext::new(operation).with_collection(collection),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn fetch_poses(&self) -> RepositoryResult<Vec<PoseDocument>> {
        self.check_health("fetch_poses", POSES_COLLECTION)?;
        Ok(self.data.read().poses.clone())
    }

    async fn fetch_videos(&self) -> RepositoryResult<Vec<VideoDocument>> {
        self.check_health("fetch_videos", VIDEOS_COLLECTION)?;
        Ok(self.data.read().videos.clone())
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
