//! Video dashboard: publishing activity and channel popularity.

use log::debug;

use super::ServiceResult;
use crate::algorithms::{word_frequencies, CalendarBuckets, FrequencyTable, MAX_CLOUD_WORDS};
use crate::db::repository::DocumentRepository;
use crate::db::services as db_services;
use crate::models::{Snapshot, VideoRecord};
use crate::routes::charts::{ChartKind, ChartPayload, ChartPoint};
use crate::routes::dashboard::DashboardData;
use crate::routes::landing::DashboardView;

/// Channels shown in the lollipop chart.
pub const TOP_CHANNELS: usize = 10;

pub const HEADING: &str = "Pilates Video Data Visualization";

/// Marker colours of the monthly line, one per month.
pub const MONTH_PALETTE: [&str; 12] = [
    "#DCAE96", "#9B90C2", "#8EB6A2", "#7A9E9F", "#B0889B", "#D4A373", "#E3B8A0", "#A19FA6",
    "#C5B3B3", "#A0AFAE", "#C3B299", "#AD8B73",
];

/// Lay out the video charts for an already loaded snapshot.
pub fn build_video_dashboard(snapshot: &Snapshot<VideoRecord>) -> ServiceResult<DashboardData> {
    let calendar =
        CalendarBuckets::from_timestamps(snapshot.records.iter().map(|r| r.published_at.as_str()));
    debug!(
        "Bucketed {} video timestamps ({} skipped)",
        calendar.bucketed(),
        calendar.skipped
    );

    let per_year = ChartPayload::new("videos_per_year", ChartKind::Bar, "Pilates Videos per Year")
        .with_axes("Year", "Number of Videos")
        .with_points(
            calendar
                .by_year
                .iter()
                .map(|y| ChartPoint::new(y.year.to_string(), y.count)),
        );

    let channels = FrequencyTable::from_labels(snapshot.records.iter().map(|r| &r.channel_title));
    let top_channels = ChartPayload::new(
        "top_channels",
        ChartKind::Lollipop,
        format!("Top {} Pilates Channels", TOP_CHANNELS),
    )
    .with_axes("Number of Videos", "Channel Name")
    .horizontal()
    .with_ranking(channels.top(TOP_CHANNELS)?);

    let per_month = ChartPayload::new(
        "videos_per_month",
        ChartKind::Line,
        "Pilates Video Distribution per Month",
    )
    .with_axes("Month", "Number of Videos")
    .with_points(
        calendar
            .by_month
            .iter()
            .map(|m| ChartPoint::new(m.month.name(), m.count)),
    )
    .with_palette(&MONTH_PALETTE);

    let title_cloud = ChartPayload::new(
        "title_word_cloud",
        ChartKind::WordCloud,
        "Pilates Video Title Word Cloud",
    )
    .with_points(
        word_frequencies(snapshot.records.iter().map(|r| &r.title), MAX_CLOUD_WORDS)
            .into_iter()
            .map(ChartPoint::from),
    );

    Ok(DashboardData {
        view: DashboardView::Videos,
        heading: HEADING.to_string(),
        record_count: snapshot.len(),
        skipped_records: snapshot.skipped + calendar.skipped,
        charts: vec![per_year, top_channels, per_month, title_cloud],
    })
}

/// Load the videos collection and build its dashboard.
pub async fn get_video_dashboard<R: DocumentRepository + ?Sized>(
    repo: &R,
) -> ServiceResult<DashboardData> {
    let snapshot = db_services::load_videos(repo).await?;
    build_video_dashboard(&snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(title: &str, channel: &str, published_at: &str) -> VideoRecord {
        VideoRecord {
            title: title.to_string(),
            channel_title: channel.to_string(),
            published_at: published_at.to_string(),
        }
    }

    fn snapshot(records: Vec<VideoRecord>) -> Snapshot<VideoRecord> {
        Snapshot {
            records,
            skipped: 0,
        }
    }

    fn series(chart: &ChartPayload) -> Vec<(&str, usize)> {
        chart
            .points
            .iter()
            .map(|p| (p.label.as_str(), p.value))
            .collect()
    }

    #[test]
    fn test_year_and_month_series() {
        let data = build_video_dashboard(&snapshot(vec![
            video("a", "Studio", "2023-01-15T10:00:00Z"),
            video("b", "Studio", "2023-01-20T08:30:00Z"),
            video("c", "Core", "2022-02-01T00:00:00Z"),
        ]))
        .unwrap();

        let years = data.chart("videos_per_year").unwrap();
        assert_eq!(series(years), vec![("2022", 1), ("2023", 2)]);

        let months = data.chart("videos_per_month").unwrap();
        assert_eq!(series(months), vec![("January", 2), ("February", 1)]);
        assert_eq!(months.points[0].color.as_deref(), Some(MONTH_PALETTE[0]));
        assert_eq!(months.points[1].color.as_deref(), Some(MONTH_PALETTE[1]));
    }

    #[test]
    fn test_top_channels() {
        let mut records = Vec::new();
        for i in 0..15 {
            for _ in 0..(15 - i) {
                records.push(video("t", &format!("Channel {}", i), "2023-05-01"));
            }
        }
        let data = build_video_dashboard(&snapshot(records)).unwrap();

        let lollipop = data.chart("top_channels").unwrap();
        assert_eq!(lollipop.kind, ChartKind::Lollipop);
        assert_eq!(lollipop.points.len(), TOP_CHANNELS);
        assert_eq!(lollipop.points[0].label, "Channel 0");
        assert_eq!(lollipop.points[0].value, 15);
    }

    #[test]
    fn test_malformed_timestamp_is_skipped() {
        let mut records: Vec<VideoRecord> = (1..=10)
            .map(|d| video("t", "c", &format!("2023-03-{:02}", d)))
            .collect();
        records.push(video("t", "c", "yesterday"));

        let data = build_video_dashboard(&snapshot(records)).unwrap();
        assert_eq!(data.record_count, 11);
        assert_eq!(data.skipped_records, 1);
        assert_eq!(data.chart("videos_per_year").unwrap().total(), 10);
        // The channel tally still sees every record.
        assert_eq!(data.chart("top_channels").unwrap().total(), 11);
    }

    #[test]
    fn test_title_word_cloud() {
        let data = build_video_dashboard(&snapshot(vec![
            video("Pilates for Beginners", "c", "2023-01-01"),
            video("Morning Pilates", "c", "2023-01-02"),
        ]))
        .unwrap();

        let cloud = data.chart("title_word_cloud").unwrap();
        assert_eq!(cloud.points[0].label, "Pilates");
        assert_eq!(cloud.points[0].weight, Some(1.0));
    }

    #[test]
    fn test_empty_snapshot() {
        let data = build_video_dashboard(&snapshot(Vec::new())).unwrap();
        assert_eq!(data.charts.len(), 4);
        assert!(data.charts.iter().all(|c| c.points.is_empty()));
        assert_eq!(data.skipped_records, 0);
    }
}
