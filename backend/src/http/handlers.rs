//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{DashboardData, DashboardView, HealthResponse, ViewListResponse};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::routes::landing::view_options;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Reports the process as up and whether the document store answers.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
        backend: state.repository.backend_name().to_string(),
    }))
}

// =============================================================================
// Dashboards
// =============================================================================

/// GET /v1/views
///
/// The view selector entries.
pub async fn list_views() -> HandlerResult<ViewListResponse> {
    Ok(Json(ViewListResponse {
        views: view_options(),
        default_view: DashboardView::default(),
    }))
}

/// GET /v1/dashboard
///
/// Dashboard of the default view.
pub async fn get_default_dashboard(State(state): State<AppState>) -> HandlerResult<DashboardData> {
    render(&state, DashboardView::default()).await
}

/// GET /v1/dashboards/{view}
///
/// Fetch the view's collection and compute all of its charts.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(view): Path<String>,
) -> HandlerResult<DashboardData> {
    let view: DashboardView = view.parse().map_err(AppError::NotFound)?;
    render(&state, view).await
}

async fn render(state: &AppState, view: DashboardView) -> HandlerResult<DashboardData> {
    let data = services::get_dashboard(state.repository.as_ref(), view).await?;
    tracing::info!(
        view = %view,
        records = data.record_count,
        skipped = data.skipped_records,
        "Dashboard computed"
    );
    Ok(Json(data))
}
