//! Chart layout composition.
//!
//! The top margin is split into stacked horizontal bands, one per header
//! element, so the title, the range-selector row and the legend can never
//! overlap each other or the plot area. Positions handed to the renderer are
//! derived from those bands.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DisplayToggles;

/// Total figure height in pixels. Width follows the container.
pub const FIGURE_HEIGHT: usize = 560;

const TITLE_BAND: usize = 44;
const SELECTOR_BAND: usize = 30;
/// Height of one row of horizontal legend entries.
pub const LEGEND_ROW: usize = 22;
/// The horizontal legend wraps upward on narrow containers.
pub const LEGEND_ROWS: usize = 2;
const LEGEND_BAND: usize = LEGEND_ROW * LEGEND_ROWS;
const BAND_GAP: usize = 8;

const MARGIN_LEFT: usize = 60;
const MARGIN_RIGHT: usize = 30;
const MARGIN_BOTTOM: usize = 40;

const MAX_X_TICKS: usize = 12;

/// Vertical pixel interval measured from the top edge of the figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub top: usize,
    pub bottom: usize,
}

impl Band {
    fn below(previous: &Band, height: usize) -> Self {
        Self {
            top: previous.bottom,
            bottom: previous.bottom + height,
        }
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top
    }

    pub fn overlaps(&self, other: &Band) -> bool {
        self.top < other.bottom && other.top < self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
    pub left: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleSpec {
    pub text: String,
    /// Horizontal position as a fraction of the figure width, center-anchored.
    pub x: f64,
    /// Vertical position as a fraction of the figure height, middle-anchored.
    pub y: f64,
    pub band: Band,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendSpec {
    pub horizontal: bool,
    /// Center-anchored, in plot-area fractions.
    pub x: f64,
    /// Bottom-anchored, in plot-area fractions (above 1.0 means above the plot).
    pub y: f64,
    pub band: Band,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeStep {
    Month,
    Year,
    All,
}

/// One preset zoom button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeButton {
    pub label: String,
    pub count: usize,
    pub step: RangeStep,
}

impl RangeButton {
    fn new(label: &str, count: usize, step: RangeStep) -> Self {
        Self {
            label: label.to_string(),
            count,
            step,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSelectorSpec {
    pub buttons: Vec<RangeButton>,
    /// Left-anchored, in plot-area fractions.
    pub x: f64,
    /// Bottom-anchored, in plot-area fractions.
    pub y: f64,
    pub band: Band,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisKind {
    Date,
    Linear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub title: String,
    pub kind: AxisKind,
    pub auto_margin: bool,
    pub n_ticks: Option<usize>,
}

/// Visual configuration of the forecast chart. Rebuilt from scratch for every
/// submission; nothing is carried over from a previous chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub height: usize,
    pub margin: Margin,
    pub title: TitleSpec,
    pub legend: LegendSpec,
    pub range_selector: RangeSelectorSpec,
    pub range_slider_visible: bool,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    /// Paper and plot backgrounds let the page show through.
    pub transparent_background: bool,
}

impl ChartLayout {
    /// Pixel band of the plotting area.
    pub fn plot_band(&self) -> Band {
        Band {
            top: self.margin.top,
            bottom: self.height - self.margin.bottom,
        }
    }

    /// Header bands from top to bottom followed by the plot area.
    pub fn bands(&self) -> [Band; 4] {
        [
            self.title.band,
            self.range_selector.band,
            self.legend.band,
            self.plot_band(),
        ]
    }
}

/// Builds the layout for a chart of `point_count` historical points.
///
/// Pure: identical inputs give identical layouts.
pub fn compose_layout(ticker: &str, point_count: usize, toggles: &DisplayToggles) -> ChartLayout {
    let height = FIGURE_HEIGHT;

    let title_band = Band { top: 0, bottom: TITLE_BAND };
    let selector_band = Band::below(&title_band, SELECTOR_BAND);
    let legend_band = Band::below(&selector_band, LEGEND_BAND);

    let margin = Margin {
        top: legend_band.bottom + BAND_GAP,
        right: MARGIN_RIGHT,
        bottom: MARGIN_BOTTOM,
        left: MARGIN_LEFT,
    };

    // Plot-area fraction of a pixel row measured from the figure top.
    let plot_height = (height - margin.top - margin.bottom) as f64;
    let paper_y = |pixel: usize| (height - margin.bottom) as f64 / plot_height - pixel as f64 / plot_height;

    let ticker = ticker.trim();
    let title_text = if ticker.is_empty() {
        "Actual vs Predicted Close".to_string()
    } else {
        format!("{}: Actual vs Predicted Close", ticker)
    };

    let layout = ChartLayout {
        height,
        margin,
        title: TitleSpec {
            text: title_text,
            x: 0.5,
            y: 1.0 - (title_band.top + title_band.height() / 2) as f64 / height as f64,
            band: title_band,
        },
        legend: LegendSpec {
            horizontal: true,
            x: 0.5,
            y: paper_y(legend_band.bottom),
            band: legend_band,
        },
        range_selector: RangeSelectorSpec {
            buttons: vec![
                RangeButton::new("3m", 3, RangeStep::Month),
                RangeButton::new("6m", 6, RangeStep::Month),
                RangeButton::new("1y", 1, RangeStep::Year),
                RangeButton::new("all", 1, RangeStep::All),
            ],
            x: 0.0,
            y: paper_y(selector_band.bottom),
            band: selector_band,
        },
        range_slider_visible: toggles.show_rangeslider,
        x_axis: AxisSpec {
            title: "Date".to_string(),
            kind: AxisKind::Date,
            auto_margin: true,
            n_ticks: (point_count > 0).then(|| point_count.min(MAX_X_TICKS)),
        },
        y_axis: AxisSpec {
            title: "Price".to_string(),
            kind: AxisKind::Linear,
            auto_margin: true,
            n_ticks: None,
        },
        transparent_background: true,
    };

    debug!(
        ticker,
        point_count,
        range_slider = layout.range_slider_visible,
        "Composed chart layout"
    );
    layout
}
