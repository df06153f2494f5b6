use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::client::ApiClient;
use crate::config::Settings;
use commands::{delete_model, health, list_models, predict};

#[derive(Parser)]
#[command(name = "stockcast")]
#[command(about = "Train and chart stock price forecasts from the command line")]
#[command(version)]
pub struct Cli {
    /// Base URL of the forecasting service
    ///
    /// Falls back to STOCKCAST_API_URL, then to `api_url` in stockcast.toml.
    #[arg(long, global = true, env = "STOCKCAST_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Request a forecast and write it as an HTML chart
    Predict(PredictArgs),
    /// Check that the forecasting service is up
    Health,
    /// List models the service has saved
    Models,
    /// Delete the saved model of a ticker
    DeleteModel {
        /// Ticker whose model should be removed
        #[arg(short, long)]
        ticker: String,
    },
}

/// Mirrors the fields of the web form. Numbers are taken as text and fall
/// back to their defaults when missing or unparsable.
#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// Ticker symbol, e.g. AAPL
    #[arg(short, long)]
    pub ticker: String,

    /// First day of the training range (YYYY-MM-DD)
    #[arg(long, default_value = "2018-01-01")]
    pub start: String,

    /// Last day of the training range (YYYY-MM-DD), today when omitted
    #[arg(long)]
    pub end: Option<String>,

    /// Past steps the model conditions on (default 60)
    #[arg(long)]
    pub lookback: Option<String>,

    /// Training epochs (default 10)
    #[arg(long)]
    pub epochs: Option<String>,

    /// Days to forecast past the last historical date (default 30)
    #[arg(long)]
    pub future_days: Option<String>,

    /// Training batch size (default 32)
    #[arg(long)]
    pub batch_size: Option<String>,

    /// Train from scratch even if a saved model exists
    #[arg(long)]
    pub force_retrain: bool,

    /// Hide the range slider under the chart
    #[arg(long)]
    pub no_rangeslider: bool,

    /// Plot raw predictions instead of the moving average
    #[arg(long)]
    pub raw_predictions: bool,

    /// Do not highlight the most recent actual prices
    #[arg(long)]
    pub no_recent_markers: bool,

    /// Output HTML file, overrides the configured one
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    pub async fn run(self, settings: Settings) -> Result<()> {
        let api_url = self.api_url.unwrap_or_else(|| settings.api_url.clone());
        let client = ApiClient::new(api_url);

        match self.command {
            Commands::Predict(args) => {
                predict(client, &settings, args).await?;
            }
            Commands::Health => {
                health(&client).await?;
            }
            Commands::Models => {
                list_models(&client).await?;
            }
            Commands::DeleteModel { ticker } => {
                delete_model(&client, &ticker).await?;
            }
        }
        Ok(())
    }
}
