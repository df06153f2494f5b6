//! Submission orchestration shared by every front end.
//!
//! The controller owns no I/O of its own: it talks to the prediction service
//! and to the page through the two traits below, which keeps the busy/idle
//! discipline testable without a browser or a network.

use async_trait::async_trait;
use common::{PredictionForm, PredictionRequest, PredictionResponse, RequestError};
use tracing::{debug, error, info, instrument};

use crate::config::{ChartConfig, DisplayToggles};
use crate::error::Result;
use crate::render::Chart;

pub const RUNNING_STATUS: &str = "Training model and generating predictions...";
pub const DONE_STATUS: &str = "Done.";

/// Anything able to answer a prediction request.
///
/// Futures are not `Send`: browser futures never are.
#[async_trait(?Send)]
pub trait PredictionService {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> std::result::Result<PredictionResponse, RequestError>;
}

/// The page (or file) the controller reports to.
pub trait ChartSurface {
    /// Shows the current busy flag, status line and metrics.
    fn publish(&mut self, state: &ViewState);

    /// Removes any previously drawn chart.
    fn clear(&mut self);

    fn draw(&mut self, chart: &Chart) -> Result<()>;
}

/// Summary figures of a successful prediction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metrics {
    pub ticker: String,
    pub rmse: f64,
    pub model_path: Option<String>,
}

impl Metrics {
    /// RMSE with two decimals.
    pub fn rmse_text(&self) -> String {
        format!("{:.2}", self.rmse)
    }

    pub fn summary(&self) -> String {
        format!("Ticker: {} | RMSE: {}", self.ticker, self.rmse_text())
    }
}

/// What the view shows at any moment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    /// While set the submit control is disabled.
    pub busy: bool,
    pub status: String,
    pub metrics: Option<Metrics>,
    /// The last submission ended with an error.
    pub failed: bool,
    /// Bare error message of a failed submission, without the `Error: ` prefix.
    pub error: Option<String>,
}

impl ViewState {
    fn running() -> Self {
        Self {
            busy: true,
            status: RUNNING_STATUS.to_string(),
            metrics: None,
            failed: false,
            error: None,
        }
    }
}

pub struct ViewController<S, C> {
    service: S,
    surface: C,
    config: ChartConfig,
    state: ViewState,
}

impl<S, C> ViewController<S, C>
where
    S: PredictionService,
    C: ChartSurface,
{
    pub fn new(service: S, surface: C, config: ChartConfig) -> Self {
        Self {
            service,
            surface,
            config,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn surface(&self) -> &C {
        &self.surface
    }

    pub fn into_surface(self) -> C {
        self.surface
    }

    /// Passes the form through unvalidated and runs one submission.
    pub async fn submit_form(&mut self, form: &PredictionForm) -> &ViewState {
        let request = form.to_request();
        let toggles = DisplayToggles::from_form(form);
        self.submit(request, toggles).await
    }

    /// Runs one full submission. The busy flag is cleared on every path.
    #[instrument(skip(self, request), fields(ticker = %request.ticker))]
    pub async fn submit(&mut self, request: PredictionRequest, toggles: DisplayToggles) -> &ViewState {
        self.state = ViewState::running();
        self.surface.clear();
        self.surface.publish(&self.state);

        debug!(?request, "Submitting prediction request");
        let outcome = self.service.predict(&request).await;

        match outcome {
            Ok(response) => self.show_response(&request, &response, &toggles),
            Err(err) => self.show_error(&err.to_string()),
        }

        self.state.busy = false;
        self.surface.publish(&self.state);
        &self.state
    }

    fn show_response(
        &mut self,
        request: &PredictionRequest,
        response: &PredictionResponse,
        toggles: &DisplayToggles,
    ) {
        let ticker = if response.ticker.trim().is_empty() {
            request.ticker.clone()
        } else {
            response.ticker.clone()
        };
        let metrics = Metrics {
            ticker,
            rmse: response.rmse,
            model_path: response.model_path.clone(),
        };
        info!(ticker = %metrics.ticker, rmse = %metrics.rmse_text(), "Prediction received");
        let chart = Chart::compose(&metrics.ticker, response, toggles, &self.config);
        self.state.metrics = Some(metrics);

        match self.surface.draw(&chart) {
            Ok(()) => self.state.status = DONE_STATUS.to_string(),
            Err(err) => self.show_error(&err.to_string()),
        }
    }

    fn show_error(&mut self, message: &str) {
        error!(message, "Prediction failed");
        self.state.status = format!("Error: {}", message);
        self.state.failed = true;
        self.state.error = Some(message.to_string());
    }
}
