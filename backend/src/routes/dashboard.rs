use serde::{Deserialize, Serialize};

use super::charts::ChartPayload;
use super::landing::DashboardView;

/// Everything one view of the dashboard shows, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub view: DashboardView,
    pub heading: String,
    /// Records that passed validation and fed the charts.
    pub record_count: usize,
    /// Documents or timestamps dropped as malformed.
    pub skipped_records: usize,
    /// Charts in display order.
    pub charts: Vec<ChartPayload>,
}

impl DashboardData {
    /// Chart with the given identifier.
    pub fn chart(&self, id: &str) -> Option<&ChartPayload> {
        self.charts.iter().find(|c| c.id == id)
    }
}
