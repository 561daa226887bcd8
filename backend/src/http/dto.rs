//! Data Transfer Objects for the HTTP API.
//!
//! Dashboard payloads are re-exported from the routes module since they
//! already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    ChartKind, ChartPayload, ChartPoint, DashboardData, DashboardView, Orientation, ViewOption,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Document store connection status
    pub database: String,
    /// Repository backend in use
    pub backend: String,
}

/// View selector response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewListResponse {
    /// Selector entries, default first
    pub views: Vec<ViewOption>,
    pub default_view: DashboardView,
}
