use common::PredictionResponse;
use plotly::common::{Anchor, DashType, Line, Marker, Mode, Orientation, Title};
use plotly::configuration::ModeBarButtonName;
use plotly::layout::{
    Axis, AxisType, HoverMode, Legend, Margin, RangeSelector, RangeSlider, SelectorButton,
    SelectorStep, StepMode,
};
use plotly::{Configuration, Layout, Plot, Scatter};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::{ChartConfig, DisplayToggles};
use crate::error::Result;
use crate::layout::{compose_layout, AxisKind, AxisSpec, ChartLayout, RangeStep};
use crate::series::{compose_series, ChartSeries, LineDash, RenderMode};

const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// Fixed renderer options handed over with every chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub display_logo: bool,
    pub responsive: bool,
    /// Drop the lasso tool from the toolbar; it is meaningless on a line chart.
    pub remove_lasso: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            display_logo: false,
            responsive: true,
            remove_lasso: true,
        }
    }
}

/// Everything the renderer needs to draw one forecast chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub series: Vec<ChartSeries>,
    pub layout: ChartLayout,
    pub config: RenderConfig,
}

/// A chart serialized for a Plotly `newPlot(div, data, layout, config)` call.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotJson {
    pub data: String,
    pub layout: String,
    pub config: String,
}

impl Chart {
    /// Composes series and layout for a response. `ticker` names the chart;
    /// callers pass the resolved one since responses may leave it blank.
    pub fn compose(
        ticker: &str,
        response: &PredictionResponse,
        toggles: &DisplayToggles,
        config: &ChartConfig,
    ) -> Self {
        Self {
            series: compose_series(response, toggles, config),
            layout: compose_layout(ticker, response.point_count(), toggles),
            config: RenderConfig::default(),
        }
    }

    pub fn to_plot(&self) -> Plot {
        let mut plot = Plot::new();
        for trace in self.traces() {
            plot.add_trace(trace);
        }
        plot.set_layout(to_layout(&self.layout));
        plot.set_configuration(to_configuration(&self.config));
        plot
    }

    /// Serializes the three `newPlot` arguments separately.
    pub fn to_plot_json(&self) -> Result<PlotJson> {
        let json = PlotJson {
            data: serde_json::to_string(&self.traces())?,
            layout: serde_json::to_string(&to_layout(&self.layout))?,
            config: serde_json::to_string(&to_configuration(&self.config))?,
        };
        trace!(bytes = json.data.len(), "Serialized chart traces");
        Ok(json)
    }

    fn traces(&self) -> Vec<Box<Scatter<String, f64>>> {
        self.series.iter().map(to_trace).collect()
    }
}

fn to_trace(series: &ChartSeries) -> Box<Scatter<String, f64>> {
    let mode = match series.mode {
        RenderMode::Line => Mode::Lines,
        RenderMode::Markers => Mode::Markers,
        RenderMode::LineMarkers => Mode::LinesMarkers,
    };
    let dash = match series.style.dash {
        LineDash::Solid => DashType::Solid,
        LineDash::Dash => DashType::Dash,
        LineDash::Dot => DashType::Dot,
    };

    let mut trace = Scatter::new(series.x.clone(), series.y.clone())
        .name(&series.name)
        .mode(mode);

    if series.mode != RenderMode::Markers {
        trace = trace.line(
            Line::new()
                .color(series.style.color.clone())
                .width(series.style.line_width)
                .dash(dash),
        );
    }
    if let Some(size) = series.style.marker_size {
        trace = trace.marker(Marker::new().size(size).color(series.style.color.clone()));
    }
    trace
}

fn to_axis(axis_spec: &AxisSpec) -> Axis {
    let kind = match axis_spec.kind {
        AxisKind::Date => AxisType::Date,
        AxisKind::Linear => AxisType::Linear,
    };
    let mut axis = Axis::new()
        .title(Title::with_text(axis_spec.title.as_str()))
        .type_(kind)
        .auto_margin(axis_spec.auto_margin);
    if let Some(n_ticks) = axis_spec.n_ticks {
        axis = axis.n_ticks(n_ticks);
    }
    axis
}

fn to_layout(layout: &ChartLayout) -> Layout {
    let buttons = layout
        .range_selector
        .buttons
        .iter()
        .map(|button| {
            let selector = SelectorButton::new().label(button.label.as_str());
            match button.step {
                RangeStep::Month => selector
                    .count(button.count)
                    .step(SelectorStep::Month)
                    .step_mode(StepMode::Backward),
                RangeStep::Year => selector
                    .count(button.count)
                    .step(SelectorStep::Year)
                    .step_mode(StepMode::Backward),
                RangeStep::All => selector.step(SelectorStep::All),
            }
        })
        .collect::<Vec<_>>();

    let x_axis = to_axis(&layout.x_axis)
        .range_selector(
            RangeSelector::new()
                .buttons(buttons)
                .x(layout.range_selector.x)
                .x_anchor(Anchor::Left)
                .y(layout.range_selector.y)
                .y_anchor(Anchor::Bottom),
        )
        .range_slider(RangeSlider::new().visible(layout.range_slider_visible));

    let orientation = if layout.legend.horizontal {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    };

    let mut plotly_layout = Layout::new()
        .title(
            Title::with_text(layout.title.text.as_str())
                .x(layout.title.x)
                .x_anchor(Anchor::Center)
                .y(layout.title.y)
                .y_anchor(Anchor::Middle),
        )
        .height(layout.height)
        .margin(
            Margin::new()
                .top(layout.margin.top)
                .right(layout.margin.right)
                .bottom(layout.margin.bottom)
                .left(layout.margin.left),
        )
        .show_legend(true)
        .legend(
            Legend::new()
                .orientation(orientation)
                .x(layout.legend.x)
                .x_anchor(Anchor::Center)
                .y(layout.legend.y)
                .y_anchor(Anchor::Bottom),
        )
        .hover_mode(HoverMode::XUnified)
        .x_axis(x_axis)
        .y_axis(to_axis(&layout.y_axis));

    if layout.transparent_background {
        plotly_layout = plotly_layout
            .paper_background_color(TRANSPARENT)
            .plot_background_color(TRANSPARENT);
    }
    plotly_layout
}

fn to_configuration(config: &RenderConfig) -> Configuration {
    let mut configuration = Configuration::new()
        .display_logo(config.display_logo)
        .responsive(config.responsive);
    if config.remove_lasso {
        configuration = configuration.mode_bar_buttons_to_remove(vec![ModeBarButtonName::Lasso2d]);
    }
    configuration
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn response() -> PredictionResponse {
        PredictionResponse {
            ticker: "ABC".to_string(),
            rmse: 0.75,
            dates: vec!["2024-01-01".to_string(), "2024-01-02".to_string()],
            actual: vec![10.0, 12.0],
            predicted: vec![9.0, 11.0],
            future_dates: Some(vec!["2024-01-03".to_string()]),
            future_preds: Some(vec![13.0]),
            model_path: None,
        }
    }

    #[test]
    fn test_compose_bundles_series_and_layout() {
        let chart = Chart::compose("ABC", &response(), &DisplayToggles::default(), &ChartConfig::default());
        assert_eq!(chart.series.len(), 4);
        assert!(chart.layout.title.text.contains("ABC"));
        assert_eq!(chart.config, RenderConfig::default());
        assert!(!chart.config.display_logo);
    }

    #[test]
    fn test_plot_json_keeps_series_order() {
        let chart = Chart::compose("ABC", &response(), &DisplayToggles::default(), &ChartConfig::default());
        let json = chart.to_plot_json().unwrap();

        let data: Vec<Value> = serde_json::from_str(&json.data).unwrap();
        assert_eq!(data.len(), chart.series.len());
        for (trace, series) in data.iter().zip(&chart.series) {
            assert_eq!(trace["type"], "scatter");
            assert_eq!(trace["name"], series.name.as_str());
        }

        let layout: Value = serde_json::from_str(&json.layout).unwrap();
        assert!(layout.is_object());
        let config: Value = serde_json::from_str(&json.config).unwrap();
        assert!(config.is_object());
    }
}
