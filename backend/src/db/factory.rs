//! Repository factory for dependency injection.
//!
//! The server builds exactly one repository at startup and hands it to the
//! request handlers; nothing in the crate reaches for a global connection.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "mongo-repo")]
use super::repositories::MongoRepository;
use super::repository::{DocumentRepository, RepositoryError, RepositoryResult};
use super::MongoConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// MongoDB document store
    Mongo,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`; an unrecognised value logs a warning and
    /// selects Local. Without it, defaults to Mongo if a connection string is
    /// present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or_else(|e| {
                log::warn!("{}; falling back to the local repository", e);
                Self::Local
            });
        }

        if std::env::var("MONGO_URI").is_ok() || std::env::var("MONGODB_URI").is_ok() {
            Self::Mongo
        } else {
            Self::Local
        }
    }
}

fn seed_file_from_env() -> Option<PathBuf> {
    std::env::var_os("LOCAL_SEED_FILE").map(PathBuf::from)
}

fn mongo_disabled() -> RepositoryError {
    RepositoryError::configuration("Mongo repository feature not enabled")
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use pilates_viz::db::{MongoConfig, RepositoryFactory, RepositoryType};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = MongoConfig::from_env()?;
///     let _mongo = RepositoryFactory::create(RepositoryType::Mongo, Some(&config)).await?;
///
///     let _local = RepositoryFactory::create_local();
///     Ok(())
/// }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `mongo_config` - Connection settings (required for Mongo)
    pub async fn create(
        repo_type: RepositoryType,
        mongo_config: Option<&MongoConfig>,
    ) -> RepositoryResult<Arc<dyn DocumentRepository>> {
        match repo_type {
            RepositoryType::Mongo => {
                #[cfg(feature = "mongo-repo")]
                {
                    let config = mongo_config.ok_or_else(|| {
                        RepositoryError::configuration("Mongo repository requires MongoConfig")
                    })?;
                    let mongo = Self::create_mongo(config).await?;
                    Ok(mongo as Arc<dyn DocumentRepository>)
                }
                #[cfg(not(feature = "mongo-repo"))]
                {
                    let _ = mongo_config;
                    Err(mongo_disabled())
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a MongoDB repository.
    #[cfg(feature = "mongo-repo")]
    pub async fn create_mongo(config: &MongoConfig) -> RepositoryResult<Arc<MongoRepository>> {
        let repo = MongoRepository::new(config.clone()).await?;
        Ok(Arc::new(repo))
    }

    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn DocumentRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create an in-memory repository, seeded from `seed_file` when given.
    pub fn create_local_seeded(
        seed_file: Option<&Path>,
    ) -> RepositoryResult<Arc<dyn DocumentRepository>> {
        match seed_file {
            Some(path) => Ok(Arc::new(LocalRepository::from_seed_file(path)?)),
            None => Ok(Self::create_local()),
        }
    }

    /// Create repository from environment configuration.
    ///
    /// `REPOSITORY_TYPE` picks the backend; `LOCAL_SEED_FILE` seeds the
    /// in-memory one.
    pub async fn from_env() -> RepositoryResult<Arc<dyn DocumentRepository>> {
        match RepositoryType::from_env() {
            RepositoryType::Mongo => {
                #[cfg(feature = "mongo-repo")]
                {
                    let config = MongoConfig::from_env().map_err(RepositoryError::configuration)?;
                    let mongo = Self::create_mongo(&config).await?;
                    Ok(mongo as Arc<dyn DocumentRepository>)
                }
                #[cfg(not(feature = "mongo-repo"))]
                {
                    Err(mongo_disabled())
                }
            }
            RepositoryType::Local => Self::create_local_seeded(seed_file_from_env().as_deref()),
        }
    }

    /// Create repository from a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn DocumentRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config).await
    }

    /// Create repository from a RepositoryConfig instance.
    pub async fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn DocumentRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        match repo_type {
            RepositoryType::Mongo => {
                let mongo_config = config.to_mongo_config()?;
                Self::create(RepositoryType::Mongo, mongo_config.as_ref()).await
            }
            RepositoryType::Local => Self::create_local_seeded(config.seed_file()),
        }
    }

    /// Resolve the repository the server should use.
    ///
    /// Order: the file named by `REPOSITORY_CONFIG`, then a `repository.toml`
    /// in the standard locations, then plain environment variables.
    pub async fn resolve() -> RepositoryResult<Arc<dyn DocumentRepository>> {
        if let Some(path) = std::env::var_os("REPOSITORY_CONFIG") {
            log::info!("Loading repository configuration from {:?}", path);
            return Self::from_config_file(PathBuf::from(path)).await;
        }

        if let Some(path) = RepositoryConfig::default_location() {
            log::info!("Loading repository configuration from {}", path.display());
            return Self::from_config_file(path).await;
        }

        Self::from_env().await
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```
/// use pilates_viz::db::{DocumentRepository, RepositoryBuilder, RepositoryType};
///
/// # tokio_test_block(async {
/// let repo = RepositoryBuilder::new()
///     .repository_type(RepositoryType::Local)
///     .build()
///     .await
///     .unwrap();
/// assert_eq!(repo.backend_name(), "local");
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    seed_file: Option<PathBuf>,
    #[cfg(feature = "mongo-repo")]
    mongo_config: Option<MongoConfig>,
}

impl RepositoryBuilder {
    /// Create a new repository builder; the type defaults from the environment.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::from_env(),
            seed_file: None,
            #[cfg(feature = "mongo-repo")]
            mongo_config: None,
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Seed the local repository from a JSON file.
    pub fn seed_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_file = Some(path.into());
        self
    }

    /// Set the MongoDB configuration.
    #[cfg(feature = "mongo-repo")]
    pub fn mongo_config(mut self, config: MongoConfig) -> Self {
        self.mongo_config = Some(config);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, RepositoryError> {
        self.repo_type = RepositoryType::from_env();
        self.seed_file = seed_file_from_env();

        if self.repo_type == RepositoryType::Mongo {
            #[cfg(feature = "mongo-repo")]
            {
                let config = MongoConfig::from_env().map_err(RepositoryError::configuration)?;
                self.mongo_config = Some(config);
            }
            #[cfg(not(feature = "mongo-repo"))]
            {
                return Err(mongo_disabled());
            }
        }

        Ok(self)
    }

    /// Load configuration from a TOML file.
    pub fn from_config_file<P: AsRef<Path>>(
        mut self,
        config_path: P,
    ) -> Result<Self, RepositoryError> {
        let repo_config = RepositoryConfig::from_file(config_path)?;

        self.repo_type = repo_config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        self.seed_file = repo_config.local.seed_file.clone();

        #[cfg(feature = "mongo-repo")]
        {
            self.mongo_config = repo_config.to_mongo_config()?;
        }
        #[cfg(not(feature = "mongo-repo"))]
        {
            repo_config.to_mongo_config()?;
        }

        Ok(self)
    }

    /// Build the repository instance.
    pub async fn build(self) -> RepositoryResult<Arc<dyn DocumentRepository>> {
        match self.repo_type {
            RepositoryType::Local => RepositoryFactory::create_local_seeded(self.seed_file.as_deref()),
            RepositoryType::Mongo => {
                #[cfg(feature = "mongo-repo")]
                let mongo_config = self.mongo_config.as_ref();
                #[cfg(not(feature = "mongo-repo"))]
                let mongo_config = None;

                RepositoryFactory::create(RepositoryType::Mongo, mongo_config).await
            }
        }
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
