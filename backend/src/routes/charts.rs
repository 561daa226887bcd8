use serde::{Deserialize, Serialize};

use crate::algorithms::words::WordWeight;
use crate::algorithms::{RankedEntry, Ranking};

// =========================================================
// Chart payload types
// =========================================================

/// Chart type the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
    Lollipop,
    WordCloud,
}

/// Direction of the category axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Categories along the x axis.
    #[default]
    Vertical,
    /// Categories along the y axis.
    Horizontal,
}

/// One labelled value of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: usize,
    /// Percentage of the chart total (pie charts).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share: Option<f64>,
    /// Relative size in `(0, 1]` (word clouds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Marker colour hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: usize) -> Self {
        Self {
            label: label.into(),
            value,
            share: None,
            weight: None,
            color: None,
        }
    }
}

impl From<RankedEntry> for ChartPoint {
    fn from(entry: RankedEntry) -> Self {
        Self::new(entry.label, entry.count)
    }
}

impl From<WordWeight> for ChartPoint {
    fn from(word: WordWeight) -> Self {
        Self {
            weight: Some(word.weight),
            ..Self::new(word.word, word.count)
        }
    }
}

/// A single chart, ready for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    /// Stable identifier within a dashboard.
    pub id: String,
    pub kind: ChartKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    #[serde(default)]
    pub orientation: Orientation,
    /// Ordered series; an empty series renders as an empty chart.
    pub points: Vec<ChartPoint>,
}

impl ChartPayload {
    pub fn new(id: impl Into<String>, kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            x_label: None,
            y_label: None,
            orientation: Orientation::Vertical,
            points: Vec::new(),
        }
    }

    pub fn with_axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
    }

    pub fn horizontal(mut self) -> Self {
        self.orientation = Orientation::Horizontal;
        self
    }

    pub fn with_points(mut self, points: impl IntoIterator<Item = ChartPoint>) -> Self {
        self.points = points.into_iter().collect();
        self
    }

    /// Points from a ranking, in rank order.
    pub fn with_ranking(self, ranking: Ranking) -> Self {
        self.with_points(ranking.into_iter().map(ChartPoint::from))
    }

    /// Points from a ranking, each carrying its percentage share.
    pub fn with_shares(self, ranking: Ranking) -> Self {
        let shares = ranking.shares();
        self.with_points(ranking.into_iter().zip(shares).map(|(entry, share)| ChartPoint {
            share: Some(share),
            ..ChartPoint::from(entry)
        }))
    }

    /// Assign colours to points in order, cycling through `palette`.
    pub fn with_palette(mut self, palette: &[&str]) -> Self {
        if palette.is_empty() {
            return self;
        }
        for (point, color) in self.points.iter_mut().zip(palette.iter().cycle()) {
            point.color = Some((*color).to_string());
        }
        self
    }

    /// Sum of all point values.
    pub fn total(&self) -> usize {
        self.points.iter().map(|p| p.value).sum()
    }
}
