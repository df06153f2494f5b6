use anyhow::{bail, Result};
use chart::ViewController;
use chrono::{Local, NaiveDate};
use common::PredictionForm;
use tracing::{debug, info, trace};

use crate::cli::PredictArgs;
use crate::client::ApiClient;
use crate::config::Settings;
use crate::surface::HtmlSurface;

pub async fn predict(client: ApiClient, settings: &Settings, args: PredictArgs) -> Result<()> {
    trace!("Entering predict command");
    let today = Local::now().date_naive();
    let form = form_from_args(&args, today);
    let output = args.output.unwrap_or_else(|| settings.output.clone());
    debug!(?form, output = %output.display(), "Prepared prediction form");

    let mut controller = ViewController::new(client, HtmlSurface::new(output), settings.chart_config());
    let state = controller.submit_form(&form).await;

    if state.failed {
        // Status already went to stdout; main prefixes the returned error itself.
        bail!("{}", state.error.as_deref().unwrap_or("prediction failed"));
    }

    info!(path = %controller.surface().path().display(), "Forecast chart ready");
    println!("Chart written to {}", controller.surface().path().display());
    Ok(())
}

fn form_from_args(args: &PredictArgs, today: NaiveDate) -> PredictionForm {
    PredictionForm {
        ticker: args.ticker.clone(),
        start: args.start.clone(),
        end: args
            .end
            .clone()
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
        lookback: args.lookback.clone(),
        epochs: args.epochs.clone(),
        future_days: args.future_days.clone(),
        batch_size: args.batch_size.clone(),
        force_retrain: Some(args.force_retrain),
        show_rangeslider: Some(!args.no_rangeslider),
        smooth_predicted: Some(!args.raw_predictions),
        show_recent_markers: Some(!args.no_recent_markers),
    }
}
