use common::PredictionForm;
use serde::{Deserialize, Serialize};

/// Number of trailing actual points highlighted as markers.
pub const DEFAULT_RECENT_MARKER_COUNT: usize = 12;
/// Window of the moving average applied to the predicted series.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 3;

/// Presentation switches the user can flip on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayToggles {
    pub show_rangeslider: bool,
    pub smooth_predicted: bool,
    pub show_recent_markers: bool,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        Self {
            show_rangeslider: true,
            smooth_predicted: true,
            show_recent_markers: true,
        }
    }
}

impl DisplayToggles {
    /// Reads the toggles from a form; a missing control counts as enabled.
    pub fn from_form(form: &PredictionForm) -> Self {
        Self {
            show_rangeslider: form.show_rangeslider.unwrap_or(true),
            smooth_predicted: form.smooth_predicted.unwrap_or(true),
            show_recent_markers: form.show_recent_markers.unwrap_or(true),
        }
    }
}

/// Colors used for each series role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub actual: String,
    pub recent: String,
    pub predicted: String,
    pub future: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            actual: "rgb(59, 130, 246)".to_string(),
            recent: "rgb(37, 99, 235)".to_string(),
            predicted: "rgb(251, 146, 60)".to_string(),
            future: "rgb(34, 197, 94)".to_string(),
        }
    }
}

/// Constants that shape the chart, independent of any single response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// How many trailing points the recent-markers series shows.
    pub recent_marker_count: usize,
    /// Moving-average window for the predicted series. Zero is treated as one.
    pub smoothing_window: usize,
    pub palette: Palette,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            recent_marker_count: DEFAULT_RECENT_MARKER_COUNT,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            palette: Palette::default(),
        }
    }
}

impl ChartConfig {
    pub fn with_recent_marker_count(mut self, count: usize) -> Self {
        self.recent_marker_count = count;
        self
    }

    pub fn with_smoothing_window(mut self, window: usize) -> Self {
        self.smoothing_window = window;
        self
    }

    pub(crate) fn effective_window(&self) -> usize {
        self.smoothing_window.max(1)
    }
}
