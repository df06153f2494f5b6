use anyhow::Result;
use chart::ChartConfig;
use ::config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Command-line client settings.
///
/// Layered as built-in defaults, then an optional `stockcast.toml` in the
/// working directory, then `STOCKCAST_*` environment variables (a `.env`
/// file is read first). Command-line flags override the result.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Base URL of the forecasting service, without the `/api/...` path.
    pub api_url: String,
    /// Trailing actual points highlighted as markers.
    pub recent_markers: usize,
    pub smoothing_window: usize,
    /// Where `predict` writes the chart.
    pub output: PathBuf,
}

impl Settings {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = Config::builder()
            .set_default("api_url", "http://localhost:5000")?
            .set_default("recent_markers", chart::config::DEFAULT_RECENT_MARKER_COUNT as i64)?
            .set_default("smoothing_window", chart::config::DEFAULT_SMOOTHING_WINDOW as i64)?
            .set_default("output", "forecast.html")?
            .add_source(File::with_name("stockcast").required(false))
            .add_source(Environment::with_prefix("STOCKCAST"))
            .build()?
            .try_deserialize::<Settings>()?;

        tracing::debug!(?settings, "Loaded settings");
        Ok(settings)
    }

    pub fn chart_config(&self) -> ChartConfig {
        ChartConfig::default()
            .with_recent_marker_count(self.recent_markers)
            .with_smoothing_window(self.smoothing_window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_config_from_settings() {
        let settings = Settings {
            api_url: "http://localhost:5000".to_string(),
            recent_markers: 8,
            smoothing_window: 5,
            output: PathBuf::from("out.html"),
        };

        let config = settings.chart_config();
        assert_eq!(config.recent_marker_count, 8);
        assert_eq!(config.smoothing_window, 5);
    }
}
