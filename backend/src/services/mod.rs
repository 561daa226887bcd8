//! Service layer for dashboard assembly.
//!
//! Each service performs one full pass for its view: load the collection
//! through the repository, aggregate it, and lay the results out as the
//! chart payloads the UI draws. Nothing is cached between calls.

pub mod poses;
pub mod videos;

pub use poses::{build_pose_dashboard, get_pose_dashboard};
pub use videos::{build_video_dashboard, get_video_dashboard};

use crate::algorithms::AggregationError;
use crate::db::repository::{DocumentRepository, RepositoryError};
use crate::routes::dashboard::DashboardData;
use crate::routes::landing::DashboardView;

/// Errors surfaced by a dashboard pass.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Compute the dashboard for `view`.
pub async fn get_dashboard<R: DocumentRepository + ?Sized>(
    repo: &R,
    view: DashboardView,
) -> ServiceResult<DashboardData> {
    match view {
        DashboardView::Poses => get_pose_dashboard(repo).await,
        DashboardView::Videos => get_video_dashboard(repo).await,
    }
}
