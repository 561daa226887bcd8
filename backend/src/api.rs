//! Public API surface.
//!
//! Consolidates the payload types returned by the dashboard services and the
//! HTTP API. All types derive Serialize/Deserialize for JSON serialization.

pub use crate::algorithms::{MonthCount, RankedEntry, Ranking, WordWeight, YearCount};
pub use crate::models::time::Month;
pub use crate::routes::charts::ChartKind;
pub use crate::routes::charts::ChartPayload;
pub use crate::routes::charts::ChartPoint;
pub use crate::routes::charts::Orientation;
pub use crate::routes::dashboard::DashboardData;
pub use crate::routes::landing::DashboardView;
pub use crate::routes::landing::ViewOption;
