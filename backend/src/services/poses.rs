//! Pose dashboard: movement-name frequencies.

use log::debug;

use super::ServiceResult;
use crate::algorithms::{word_frequencies, FrequencyTable, MAX_CLOUD_WORDS};
use crate::db::repository::DocumentRepository;
use crate::db::services as db_services;
use crate::models::{PoseRecord, Snapshot};
use crate::routes::charts::{ChartKind, ChartPayload, ChartPoint};
use crate::routes::dashboard::DashboardData;
use crate::routes::landing::DashboardView;

/// Movements shown in the bar chart.
pub const TOP_MOVEMENTS: usize = 10;

/// Movements shown in the composition pie.
pub const COMPOSITION_SIZE: usize = 5;

pub const HEADING: &str = "Pilates Movement Data Visualization";

/// Lay out the pose charts for an already loaded snapshot.
pub fn build_pose_dashboard(snapshot: &Snapshot<PoseRecord>) -> ServiceResult<DashboardData> {
    let names: Vec<&str> = snapshot
        .records
        .iter()
        .map(|r| r.movement_name.as_str())
        .collect();

    let table = FrequencyTable::from_labels(&names);
    debug!(
        "Tallied {} pose records into {} distinct movements",
        table.total(),
        table.len()
    );
    let ranking = table.ranking();

    let top_movements = ChartPayload::new(
        "top_movements",
        ChartKind::Bar,
        format!("{} Most Frequent Pilates Movements", TOP_MOVEMENTS),
    )
    .with_axes("Occurrences", "Movement")
    .horizontal()
    .with_ranking(ranking.top(TOP_MOVEMENTS)?);

    let word_cloud = ChartPayload::new(
        "movement_word_cloud",
        ChartKind::WordCloud,
        "Pilates Movement Word Cloud",
    )
    .with_points(
        word_frequencies(&names, MAX_CLOUD_WORDS)
            .into_iter()
            .map(ChartPoint::from),
    );

    let composition = ChartPayload::new(
        "movement_composition",
        ChartKind::Pie,
        "Composition of the Most Mentioned Pilates Movements",
    )
    .with_shares(ranking.top(COMPOSITION_SIZE)?);

    Ok(DashboardData {
        view: DashboardView::Poses,
        heading: HEADING.to_string(),
        record_count: snapshot.len(),
        skipped_records: snapshot.skipped,
        charts: vec![top_movements, word_cloud, composition],
    })
}

/// Load the poses collection and build its dashboard.
pub async fn get_pose_dashboard<R: DocumentRepository + ?Sized>(
    repo: &R,
) -> ServiceResult<DashboardData> {
    let snapshot = db_services::load_poses(repo).await?;
    build_pose_dashboard(&snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::charts::Orientation;

    fn snapshot(names: &[&str]) -> Snapshot<PoseRecord> {
        Snapshot {
            records: names
                .iter()
                .map(|n| PoseRecord {
                    movement_name: n.to_string(),
                })
                .collect(),
            skipped: 0,
        }
    }

    #[test]
    fn test_chart_layout() {
        let data = build_pose_dashboard(&snapshot(&["Hundred", "Roll Up", "Hundred"])).unwrap();
        let ids: Vec<&str> = data.charts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["top_movements", "movement_word_cloud", "movement_composition"]
        );
        assert_eq!(data.heading, HEADING);
        assert_eq!(data.record_count, 3);
    }

    #[test]
    fn test_top_movements_limited_and_ordered() {
        let mut names = Vec::new();
        for i in 0..12 {
            for _ in 0..=i {
                names.push(format!("Move {}", i));
            }
        }
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let data = build_pose_dashboard(&snapshot(&refs)).unwrap();

        let bar = data.chart("top_movements").unwrap();
        assert_eq!(bar.orientation, Orientation::Horizontal);
        assert_eq!(bar.points.len(), TOP_MOVEMENTS);
        assert_eq!(bar.points[0].label, "Move 11");
        assert_eq!(bar.points[0].value, 12);
        assert!(bar.points.windows(2).all(|w| w[0].value >= w[1].value));

        let pie = data.chart("movement_composition").unwrap();
        assert_eq!(pie.points.len(), COMPOSITION_SIZE);
        let share_sum: f64 = pie.points.iter().filter_map(|p| p.share).sum();
        assert!((share_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let data = build_pose_dashboard(&snapshot(&["Teaser", "Saw", "Saw", "Teaser", "Swan"]))
            .unwrap();
        let labels: Vec<&str> = data.charts[0]
            .points
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Teaser", "Saw", "Swan"]);
    }

    #[test]
    fn test_empty_snapshot_gives_empty_charts() {
        let data = build_pose_dashboard(&snapshot(&[])).unwrap();
        assert_eq!(data.charts.len(), 3);
        assert!(data.charts.iter().all(|c| c.points.is_empty()));
    }
}
