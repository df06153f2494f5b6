//! In-memory collaborators for controller tests.

use std::cell::RefCell;
use std::sync::Mutex;

use async_trait::async_trait;
use common::{PredictionRequest, PredictionResponse, RequestError};

use crate::controller::{ChartSurface, PredictionService, ViewState};
use crate::error::{ChartError, Result};
use crate::render::Chart;

/// Two historical points, no horizon.
pub fn two_point_response() -> PredictionResponse {
    PredictionResponse {
        ticker: "ABC".to_string(),
        rmse: 1.23456,
        dates: vec!["2024-01-01".to_string(), "2024-01-02".to_string()],
        actual: vec![10.0, 12.0],
        predicted: vec![9.0, 11.0],
        ..Default::default()
    }
}

/// Answers every request with the same outcome and remembers what it got.
pub struct FakeService {
    outcome: std::result::Result<PredictionResponse, RequestError>,
    pub requests: RefCell<Vec<PredictionRequest>>,
}

impl FakeService {
    pub fn answering(response: PredictionResponse) -> Self {
        Self {
            outcome: Ok(response),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(err: RequestError) -> Self {
        Self {
            outcome: Err(err),
            requests: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl PredictionService for FakeService {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> std::result::Result<PredictionResponse, RequestError> {
        self.requests.borrow_mut().push(request.clone());
        self.outcome.clone()
    }
}

/// Records every interaction instead of drawing.
#[derive(Default)]
pub struct RecordingSurface {
    pub published: Vec<ViewState>,
    pub cleared: usize,
    pub drawn: Vec<Chart>,
    /// Returned by the next `draw` call.
    pub fail_with: Option<ChartError>,
}

impl ChartSurface for RecordingSurface {
    fn publish(&mut self, state: &ViewState) {
        self.published.push(state.clone());
    }

    fn clear(&mut self) {
        self.cleared += 1;
        self.drawn.clear();
    }

    fn draw(&mut self, chart: &Chart) -> Result<()> {
        if let Some(err) = self.fail_with.take() {
            return Err(err);
        }
        self.drawn.push(chart.clone());
        Ok(())
    }
}

static WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// `log` sink standing in for the browser logger.
struct WarningLog;

impl log::Log for WarningLog {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if record.level() == log::Level::Warn {
            WARNINGS.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static WARNING_LOG: WarningLog = WarningLog;

/// Installs the process-wide `log` sink once and returns every warning it
/// has seen so far, from any test.
pub fn logged_warnings() -> Vec<String> {
    if log::set_logger(&WARNING_LOG).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
    WARNINGS.lock().unwrap().clone()
}
