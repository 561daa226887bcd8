use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two entries of the dashboard's view selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardView {
    /// Crawled video metadata; the selector's first entry.
    #[default]
    Videos,
    /// Scraped pose names.
    Poses,
}

impl DashboardView {
    /// Selector entries, default first.
    pub const ALL: [DashboardView; 2] = [DashboardView::Videos, DashboardView::Poses];

    /// URL path segment.
    pub fn slug(self) -> &'static str {
        match self {
            DashboardView::Videos => "videos",
            DashboardView::Poses => "poses",
        }
    }

    /// Text shown in the selector.
    pub fn label(self) -> &'static str {
        match self {
            DashboardView::Videos => "Pilates Videos",
            DashboardView::Poses => "Poses",
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for DashboardView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "videos" | "pilates videos" | "pilates-videos" => Ok(Self::Videos),
            "poses" => Ok(Self::Poses),
            _ => Err(format!("Unknown dashboard view: {}", s)),
        }
    }
}

/// Selector entry as served to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOption {
    pub view: DashboardView,
    pub label: String,
    pub is_default: bool,
}

impl From<DashboardView> for ViewOption {
    fn from(view: DashboardView) -> Self {
        Self {
            view,
            label: view.label().to_string(),
            is_default: view == DashboardView::default(),
        }
    }
}

/// All selector entries, default first.
pub fn view_options() -> Vec<ViewOption> {
    DashboardView::ALL.into_iter().map(ViewOption::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_videos() {
        assert_eq!(DashboardView::default(), DashboardView::Videos);
        assert_eq!(DashboardView::ALL[0], DashboardView::Videos);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("poses".parse::<DashboardView>().unwrap(), DashboardView::Poses);
        assert_eq!(
            "Pilates Videos".parse::<DashboardView>().unwrap(),
            DashboardView::Videos
        );
        assert!("charts".parse::<DashboardView>().is_err());
    }

    #[test]
    fn test_view_options() {
        let options = view_options();
        assert_eq!(options.len(), 2);
        assert!(options[0].is_default);
        assert!(!options[1].is_default);
        assert_eq!(options[1].label, "Poses");
    }

    #[test]
    fn test_serializes_as_slug() {
        assert_eq!(
            serde_json::to_string(&DashboardView::Poses).unwrap(),
            "\"poses\""
        );
    }
}
