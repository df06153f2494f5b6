//! Data preparation and visualization pipeline for stock forecasts.
//!
//! A prediction response flows through [`series::compose_series`] and
//! [`layout::compose_layout`] into a [`render::Chart`], which any renderer
//! able to consume Plotly descriptions can draw. [`controller::ViewController`]
//! ties a prediction service and a rendering surface together.

pub mod config;
pub mod controller;
pub mod error;
pub mod layout;
pub mod render;
pub mod series;
pub mod smoother;

#[cfg(test)]
mod testing;

pub use config::{ChartConfig, DisplayToggles, Palette};
pub use controller::{ChartSurface, Metrics, PredictionService, ViewController, ViewState};
pub use error::{ChartError, Result};
pub use layout::{compose_layout, ChartLayout};
pub use render::{Chart, PlotJson, RenderConfig};
pub use series::{compose_series, ChartSeries, SeriesRole};
pub use smoother::smooth;
