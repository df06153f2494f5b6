use common::PredictionResponse;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{ChartConfig, DisplayToggles};
use crate::smoother::smooth;

/// What a series represents. Declaration order is the order series are
/// emitted, which drives both legend order and z-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeriesRole {
    Actual,
    RecentMarkers,
    Predicted,
    Future,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    Line,
    Markers,
    LineMarkers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineDash {
    Solid,
    Dash,
    Dot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub color: String,
    pub line_width: f64,
    pub dash: LineDash,
    /// Marker diameter in pixels, for modes that draw markers.
    pub marker_size: Option<usize>,
}

/// One plot-ready series. Never mutated after composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub role: SeriesRole,
    /// Legend label.
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub mode: RenderMode,
    pub style: SeriesStyle,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Builds the plot-ready series for one response.
///
/// Always yields the actual and predicted series; the recent-markers series
/// sits between them when enabled and the future series comes last when the
/// response carries a horizon.
pub fn compose_series(
    response: &PredictionResponse,
    toggles: &DisplayToggles,
    config: &ChartConfig,
) -> Vec<ChartSeries> {
    let palette = &config.palette;
    let mut series = Vec::with_capacity(4);

    if response.dates.len() != response.actual.len()
        || response.dates.len() != response.predicted.len()
    {
        warn!(
            dates = response.dates.len(),
            actual = response.actual.len(),
            predicted = response.predicted.len(),
            "Historical arrays differ in length, plotting the common prefix"
        );
    }

    let actual = ChartSeries {
        role: SeriesRole::Actual,
        name: "Actual".to_string(),
        x: response.dates.iter().take(response.actual.len()).cloned().collect(),
        y: response.actual.iter().take(response.dates.len()).copied().collect(),
        mode: RenderMode::Line,
        style: SeriesStyle {
            color: palette.actual.clone(),
            line_width: 2.0,
            dash: LineDash::Solid,
            marker_size: None,
        },
    };

    let recent = if toggles.show_recent_markers
        && !response.actual.is_empty()
        && config.recent_marker_count > 0
    {
        let skip = actual.len().saturating_sub(config.recent_marker_count);
        Some(ChartSeries {
            role: SeriesRole::RecentMarkers,
            name: format!("Recent (last {})", actual.len() - skip),
            x: actual.x[skip..].to_vec(),
            y: actual.y[skip..].to_vec(),
            mode: RenderMode::Markers,
            style: SeriesStyle {
                color: palette.recent.clone(),
                line_width: 0.0,
                dash: LineDash::Solid,
                marker_size: Some(8),
            },
        })
    } else {
        None
    };

    let (predicted_values, predicted_name) = if toggles.smooth_predicted {
        (
            smooth(&response.predicted, config.effective_window()),
            "Predicted (smoothed)",
        )
    } else {
        (response.predicted.clone(), "Predicted")
    };

    let predicted = ChartSeries {
        role: SeriesRole::Predicted,
        name: predicted_name.to_string(),
        x: response.dates.iter().take(predicted_values.len()).cloned().collect(),
        y: predicted_values.into_iter().take(response.dates.len()).collect(),
        mode: RenderMode::Line,
        style: SeriesStyle {
            color: palette.predicted.clone(),
            line_width: 2.0,
            dash: LineDash::Dash,
            marker_size: None,
        },
    };

    series.push(actual);
    series.extend(recent);
    series.push(predicted);

    if let Some((dates, preds)) = response.future() {
        if dates.len() != preds.len() {
            warn!(
                future_dates = dates.len(),
                future_preds = preds.len(),
                "Future arrays differ in length, plotting the common prefix"
            );
        }
        if !future_continues_history(&response.dates, dates) {
            warn!("Future dates do not start after the last historical date");
        }

        let count = dates.len().min(preds.len());
        series.push(ChartSeries {
            role: SeriesRole::Future,
            name: format!("Predicted (Future {} days)", count),
            x: dates[..count].to_vec(),
            y: preds[..count].to_vec(),
            mode: RenderMode::LineMarkers,
            style: SeriesStyle {
                color: palette.future.clone(),
                line_width: 2.0,
                dash: LineDash::Dot,
                marker_size: Some(5),
            },
        });
    }

    debug!(
        count = series.len(),
        roles = ?series.iter().map(|s| s.role).collect::<Vec<_>>(),
        "Composed chart series"
    );
    series
}

/// True when the first future date sorts strictly after the last historical
/// one. ISO `YYYY-MM-DD` strings order the same way as the dates they name.
pub fn future_continues_history(dates: &[String], future_dates: &[String]) -> bool {
    match (dates.last(), future_dates.first()) {
        (Some(last), Some(first)) => first > last,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::logged_warnings;

    fn response(n: usize) -> PredictionResponse {
        PredictionResponse {
            ticker: "ABC".to_string(),
            rmse: 1.2345,
            dates: (1..=n).map(|d| format!("2024-01-{:02}", d)).collect(),
            actual: (0..n).map(|i| 100.0 + i as f64).collect(),
            predicted: (0..n).map(|i| 99.0 + 2.0 * i as f64).collect(),
            ..Default::default()
        }
    }

    fn with_future(mut response: PredictionResponse, m: usize) -> PredictionResponse {
        response.future_dates = Some((1..=m).map(|d| format!("2024-02-{:02}", d)).collect());
        response.future_preds = Some((0..m).map(|i| 200.0 + i as f64).collect());
        response
    }

    fn roles(series: &[ChartSeries]) -> Vec<SeriesRole> {
        series.iter().map(|s| s.role).collect()
    }

    #[test]
    fn test_minimal_composition() {
        let toggles = DisplayToggles {
            show_recent_markers: false,
            ..Default::default()
        };
        let series = compose_series(&response(5), &toggles, &ChartConfig::default());
        assert_eq!(roles(&series), vec![SeriesRole::Actual, SeriesRole::Predicted]);
    }

    #[test]
    fn test_full_composition_order() {
        let series = compose_series(
            &with_future(response(20), 5),
            &DisplayToggles::default(),
            &ChartConfig::default(),
        );
        assert_eq!(
            roles(&series),
            vec![
                SeriesRole::Actual,
                SeriesRole::RecentMarkers,
                SeriesRole::Predicted,
                SeriesRole::Future
            ]
        );
    }

    #[test]
    fn test_actual_series_mirrors_response() {
        let response = response(4);
        let series = compose_series(&response, &DisplayToggles::default(), &ChartConfig::default());
        let actual = &series[0];
        assert_eq!(actual.x, response.dates);
        assert_eq!(actual.y, response.actual);
        assert_eq!(actual.mode, RenderMode::Line);
        assert_eq!(actual.style.dash, LineDash::Solid);
    }

    #[test]
    fn test_recent_markers_take_trailing_slice() {
        let response = response(30);
        let config = ChartConfig::default().with_recent_marker_count(8);
        let series = compose_series(&response, &DisplayToggles::default(), &config);

        let recent = &series[1];
        assert_eq!(recent.role, SeriesRole::RecentMarkers);
        assert_eq!(recent.mode, RenderMode::Markers);
        assert_eq!(recent.len(), 8);
        assert_eq!(recent.x, response.dates[22..].to_vec());
        assert_eq!(recent.y, response.actual[22..].to_vec());
    }

    #[test]
    fn test_recent_markers_shorter_than_k() {
        let response = response(2);
        let series = compose_series(&response, &DisplayToggles::default(), &ChartConfig::default());
        assert_eq!(series[1].role, SeriesRole::RecentMarkers);
        assert_eq!(series[1].len(), 2);
        assert_eq!(series[1].y, vec![100.0, 101.0]);
    }

    #[test]
    fn test_no_recent_markers_without_actual() {
        let series = compose_series(&response(0), &DisplayToggles::default(), &ChartConfig::default());
        assert_eq!(roles(&series), vec![SeriesRole::Actual, SeriesRole::Predicted]);
        assert!(series.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_predicted_raw_when_not_smoothing() {
        let response = response(6);
        let toggles = DisplayToggles {
            smooth_predicted: false,
            ..Default::default()
        };
        let series = compose_series(&response, &toggles, &ChartConfig::default());
        let predicted = series.iter().find(|s| s.role == SeriesRole::Predicted).unwrap();
        assert_eq!(predicted.y, response.predicted);
        assert_eq!(predicted.name, "Predicted");
        assert_eq!(predicted.style.dash, LineDash::Dash);
    }

    #[test]
    fn test_predicted_smoothed_with_window_three() {
        let response = response(6);
        let series = compose_series(&response, &DisplayToggles::default(), &ChartConfig::default());
        let predicted = series.iter().find(|s| s.role == SeriesRole::Predicted).unwrap();
        assert_eq!(predicted.y, smooth(&response.predicted, 3));
        assert_eq!(predicted.x, response.dates);
    }

    #[test]
    fn test_future_label_counts_points() {
        let series = compose_series(
            &with_future(response(3), 5),
            &DisplayToggles::default(),
            &ChartConfig::default(),
        );
        let future = series.last().unwrap();
        assert_eq!(future.role, SeriesRole::Future);
        assert_eq!(future.len(), 5);
        assert!(future.name.contains('5'));
        assert_eq!(future.mode, RenderMode::LineMarkers);
        assert_eq!(future.style.dash, LineDash::Dot);
    }

    #[test]
    fn test_empty_future_arrays_are_skipped() {
        let mut response = response(3);
        response.future_dates = Some(vec![]);
        response.future_preds = Some(vec![]);
        let series = compose_series(&response, &DisplayToggles::default(), &ChartConfig::default());
        assert!(series.iter().all(|s| s.role != SeriesRole::Future));
    }

    #[test]
    fn test_misaligned_history_uses_common_prefix() {
        let mut response = response(5);
        response.actual.truncate(3);
        let series = compose_series(&response, &DisplayToggles::default(), &ChartConfig::default());
        assert_eq!(series[0].x.len(), 3);
        assert_eq!(series[0].y.len(), 3);
        let predicted = series.iter().find(|s| s.role == SeriesRole::Predicted).unwrap();
        assert_eq!(predicted.len(), 5);
    }

    #[test]
    fn test_future_continuity() {
        let history = vec!["2024-01-30".to_string(), "2024-01-31".to_string()];
        assert!(future_continues_history(&history, &["2024-02-01".to_string()]));
        assert!(!future_continues_history(&history, &["2024-01-31".to_string()]));
        assert!(future_continues_history(&[], &["2024-01-01".to_string()]));
    }

    #[test]
    fn test_warnings_reach_the_log_facade() {
        logged_warnings();

        let mut late = with_future(response(3), 2);
        late.future_dates = Some(vec!["2023-12-30".to_string(), "2023-12-31".to_string()]);
        compose_series(&late, &DisplayToggles::default(), &ChartConfig::default());

        let warnings = logged_warnings();
        assert!(
            warnings
                .iter()
                .any(|w| w.contains("Future dates do not start after the last historical date")),
            "{:?}",
            warnings
        );
    }
}
