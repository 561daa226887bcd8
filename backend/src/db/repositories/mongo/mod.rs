//! MongoDB repository implementation.
//!
//! Reads the scraped pose documents and crawled video metadata straight from
//! their collections. Every fetch is a full `find({})`; documents are decoded
//! field by field so one oddly shaped document never fails the whole read.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `MONGO_URI` or `MONGODB_URI`: Connection string (required)
//! - `MONGO_DATABASE`: Database name (default: `pilates`)
//! - `MONGO_POSES_COLLECTION`: Pose collection (default: `poses`)
//! - `MONGO_VIDEOS_COLLECTION`: Video collection (default: `pilates_videos`)
//! - `MONGO_APP_NAME`: Application name reported to the server (default: `pilates-viz`)
//! - `MONGO_CONN_TIMEOUT_SEC`: Connect and server-selection timeout (default: 10)

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::ClientOptions;
use mongodb::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::db::repository::{
    DocumentRepository, ErrorContext, RepositoryError, RepositoryResult, POSES_COLLECTION,
    VIDEOS_COLLECTION,
};
use crate::models::{PoseDocument, VideoDocument};

/// Default database name.
pub const DEFAULT_DATABASE: &str = "pilates";

/// Configuration for connecting to MongoDB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    /// Connection string (`mongodb://` or `mongodb+srv://`)
    pub uri: String,
    /// Database holding both collections
    pub database: String,
    /// Pose collection name
    pub poses_collection: String,
    /// Video collection name
    pub videos_collection: String,
    /// Application name sent in the handshake
    pub app_name: String,
    /// Connect and server-selection timeout in seconds
    pub connect_timeout_sec: u64,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            database: DEFAULT_DATABASE.to_string(),
            poses_collection: POSES_COLLECTION.to_string(),
            videos_collection: VIDEOS_COLLECTION.to_string(),
            app_name: "pilates-viz".to_string(),
            connect_timeout_sec: 10,
        }
    }
}

impl MongoConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let uri = std::env::var("MONGO_URI")
            .or_else(|_| std::env::var("MONGODB_URI"))
            .map_err(|_| "MONGO_URI or MONGODB_URI must be set".to_string())?;

        let defaults = Self::default();
        let connect_timeout_sec = std::env::var("MONGO_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.connect_timeout_sec);

        Ok(Self {
            uri,
            database: std::env::var("MONGO_DATABASE").unwrap_or(defaults.database),
            poses_collection: std::env::var("MONGO_POSES_COLLECTION")
                .unwrap_or(defaults.poses_collection),
            videos_collection: std::env::var("MONGO_VIDEOS_COLLECTION")
                .unwrap_or(defaults.videos_collection),
            app_name: std::env::var("MONGO_APP_NAME").unwrap_or(defaults.app_name),
            connect_timeout_sec,
        })
    }

    /// Create a new configuration with a connection string.
    pub fn with_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Default::default()
        }
    }
}

/// Query counters.
#[derive(Debug, Clone, Default)]
pub struct QueryStats {
    /// Total collection reads issued
    pub total_queries: u64,
    /// Reads that returned an error
    pub failed_queries: u64,
    /// Documents streamed back across all reads
    pub documents_read: u64,
}

/// MongoDB-backed document repository.
#[derive(Clone, Debug)]
pub struct MongoRepository {
    client: Client,
    config: MongoConfig,
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
    documents_read: Arc<AtomicU64>,
}

impl MongoRepository {
    /// Build a client for `config`.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first query or health check rather than here.
    pub async fn new(config: MongoConfig) -> RepositoryResult<Self> {
        let mut options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            RepositoryError::ConfigurationError {
                message: e.to_string(),
                context: ErrorContext::new("parse_uri"),
            }
        })?;
        let timeout = Duration::from_secs(config.connect_timeout_sec);
        options.app_name = Some(config.app_name.clone());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)?;
        log::info!(
            "MongoDB client created for database '{}' (poses='{}', videos='{}')",
            config.database,
            config.poses_collection,
            config.videos_collection
        );

        Ok(Self {
            client,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
            documents_read: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn config(&self) -> &MongoConfig {
        &self.config
    }

    /// Snapshot of the query counters.
    pub fn stats(&self) -> QueryStats {
        QueryStats {
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            documents_read: self.documents_read.load(Ordering::Relaxed),
        }
    }

    /// Read every document of `collection`.
    async fn find_all(&self, operation: &str, collection: &str) -> RepositoryResult<Vec<Document>> {
        self.total_queries.fetch_add(1, Ordering::Relaxed);

        let result = async {
            let mut cursor = self
                .client
                .database(&self.config.database)
                .collection::<Document>(collection)
                .find(None, None)
                .await?;

            let mut documents = Vec::new();
            while let Some(document) = cursor.try_next().await? {
                documents.push(document);
            }
            Ok::<_, mongodb::error::Error>(documents)
        }
        .await;

        match result {
            Ok(documents) => {
                self.documents_read
                    .fetch_add(documents.len() as u64, Ordering::Relaxed);
                log::debug!("{}: read {} documents from '{}'", operation, documents.len(), collection);
                Ok(documents)
            }
            Err(e) => {
                self.failed_queries.fetch_add(1, Ordering::Relaxed);
                Err(RepositoryError::from(e)
                    .with_operation(operation)
                    .with_collection(collection))
            }
        }
    }
}

#[async_trait]
impl DocumentRepository for MongoRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.client
            .database(&self.config.database)
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map(|_| true)
            .map_err(|e| RepositoryError::from(e).with_operation("health_check"))
    }

    async fn fetch_poses(&self) -> RepositoryResult<Vec<PoseDocument>> {
        let documents = self
            .find_all("fetch_poses", &self.config.poses_collection)
            .await?;
        Ok(documents.iter().map(decode_pose).collect())
    }

    async fn fetch_videos(&self) -> RepositoryResult<Vec<VideoDocument>> {
        let documents = self
            .find_all("fetch_videos", &self.config.videos_collection)
            .await?;
        Ok(documents.iter().map(decode_video).collect())
    }

    fn backend_name(&self) -> &'static str {
        "mongo"
    }

    async fn shutdown(&self) -> RepositoryResult<()> {
        self.client.clone().shutdown().await;
        log::info!("MongoDB client shut down");
        Ok(())
    }
}

/// Text value of `key`, if it is a string.
fn text_field(document: &Document, key: &str) -> Option<String> {
    match document.get(key) {
        Some(Bson::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Publish timestamp as text: strings pass through, BSON dates become RFC 3339.
fn timestamp_field(document: &Document, key: &str) -> Option<String> {
    match document.get(key) {
        Some(Bson::String(s)) => Some(s.clone()),
        Some(Bson::DateTime(dt)) => dt.try_to_rfc3339_string().ok(),
        _ => None,
    }
}

fn decode_pose(document: &Document) -> PoseDocument {
    PoseDocument {
        movement_name: text_field(document, "nama_gerakan"),
    }
}

fn decode_video(document: &Document) -> VideoDocument {
    VideoDocument {
        title: text_field(document, "title"),
        channel_title: text_field(document, "channelTitle"),
        published_at: timestamp_field(document, "publishedAt"),
    }
}
