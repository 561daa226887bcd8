//! Tests for db::factory and db::repo_config - repository creation and configuration.

mod support;

use std::str::FromStr;

use pilates_viz::db::{
    load_poses, load_videos, DocumentRepository, RepositoryBuilder, RepositoryConfig,
    RepositoryError, RepositoryFactory, RepositoryType,
};

#[test]
fn test_repository_type_from_str() {
    assert_eq!(RepositoryType::from_str("LOCAL").unwrap(), RepositoryType::Local);
    assert_eq!(RepositoryType::from_str("memory").unwrap(), RepositoryType::Local);
    assert_eq!(RepositoryType::from_str("mongodb").unwrap(), RepositoryType::Mongo);

    let err = RepositoryType::from_str("postgres").unwrap_err();
    assert!(err.contains("Unknown repository type"));
}

#[test]
fn test_repository_type_from_env_default() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("MONGO_URI", None),
            ("MONGODB_URI", None),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[test]
fn test_repository_type_from_env_with_mongo_uri() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("MONGO_URI", None),
            ("MONGODB_URI", Some("mongodb://localhost:27017")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Mongo),
    );
}

#[test]
fn test_explicit_type_wins_over_uri() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("MONGO_URI", Some("mongodb://localhost:27017")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[tokio::test]
async fn test_local_from_config_file_with_seed() {
    let seed = support::temp_file(support::SAMPLE_SEED, ".json");
    let config = format!(
        "[repository]\ntype = \"local\"\n\n[local]\nseed_file = {:?}\n",
        seed.path().display().to_string()
    );
    let config_file = support::temp_file(&config, ".toml");

    let repo = RepositoryFactory::from_config_file(config_file.path())
        .await
        .unwrap();
    assert_eq!(repo.backend_name(), "local");

    let poses = load_poses(repo.as_ref()).await.unwrap();
    assert_eq!(poses.len(), 4);
    assert_eq!(poses.skipped, 1);

    let videos = load_videos(repo.as_ref()).await.unwrap();
    assert_eq!(videos.len(), 3);
    assert_eq!(videos.skipped, 1);
}

#[tokio::test]
async fn test_config_file_missing() {
    let result = RepositoryFactory::from_config_file("/definitely/not/here.toml").await;
    assert!(matches!(
        result,
        Err(RepositoryError::ConfigurationError { .. })
    ));
}

#[tokio::test]
async fn test_seed_file_with_invalid_json() {
    let seed = support::temp_file("{ not json", ".json");
    let result = RepositoryBuilder::new()
        .repository_type(RepositoryType::Local)
        .seed_file(seed.path())
        .build()
        .await;
    assert!(matches!(result, Err(RepositoryError::DecodeError { .. })));
}

#[test]
fn test_config_rejects_unknown_backend() {
    let config = RepositoryConfig::from_toml_str("[repository]\ntype = \"sqlite\"\n").unwrap();
    assert!(config.repository_type().is_err());
}

#[cfg(not(feature = "mongo-repo"))]
#[tokio::test]
async fn test_mongo_requires_feature() {
    let result = RepositoryFactory::create(RepositoryType::Mongo, None).await;
    let err = result.err().expect("mongo should be unavailable");
    assert!(err.to_string().contains("not enabled"));
}

#[test]
fn test_builder_from_env_local_seed() {
    let seed = support::temp_file(support::SAMPLE_SEED, ".json");
    let seed_path = seed.path().display().to_string();

    let builder = support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("LOCAL_SEED_FILE", Some(seed_path.as_str())),
        ],
        || RepositoryBuilder::new().from_env(),
    )
    .unwrap();

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let repo = runtime.block_on(builder.build()).unwrap();
    let poses = runtime.block_on(load_poses(repo.as_ref())).unwrap();
    assert_eq!(poses.len(), 4);
}

#[test]
fn test_misspelled_repository_type_falls_back_to_local() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("mongdb")),
            ("MONGO_URI", Some("mongodb://localhost:27017")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}
