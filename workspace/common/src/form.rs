use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::PredictionRequest;

pub const DEFAULT_LOOKBACK: u32 = 60;
pub const DEFAULT_EPOCHS: u32 = 10;
pub const DEFAULT_FUTURE_DAYS: u32 = 30;
pub const DEFAULT_BATCH_SIZE: u32 = 32;

/// Raw values read from the prediction form, before any interpretation.
///
/// Numeric inputs arrive as text because that is what form controls hold.
/// `None` means the control is absent from the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionForm {
    pub ticker: String,
    pub start: String,
    pub end: String,
    pub lookback: Option<String>,
    pub epochs: Option<String>,
    pub future_days: Option<String>,
    pub batch_size: Option<String>,
    pub force_retrain: Option<bool>,
    pub show_rangeslider: Option<bool>,
    pub smooth_predicted: Option<bool>,
    pub show_recent_markers: Option<bool>,
}

impl PredictionForm {
    /// Turns the form into a request. Never fails: malformed or missing
    /// numbers silently take their defaults.
    pub fn to_request(&self) -> PredictionRequest {
        let request = PredictionRequest {
            ticker: self.ticker.trim().to_string(),
            start: self.start.trim().to_string(),
            end: self.end.trim().to_string(),
            lookback: positive_or(self.lookback.as_deref(), DEFAULT_LOOKBACK),
            epochs: positive_or(self.epochs.as_deref(), DEFAULT_EPOCHS),
            future_days: number_or(self.future_days.as_deref(), DEFAULT_FUTURE_DAYS),
            batch_size: positive_or(self.batch_size.as_deref(), DEFAULT_BATCH_SIZE),
            force_retrain: self.force_retrain.unwrap_or(false),
        };
        debug!(?request, "Built prediction request from form");
        request
    }
}

fn number_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

// Lookback, epochs and batch size must be at least one.
fn positive_or(raw: Option<&str>, default: u32) -> u32 {
    match number_or(raw, default) {
        0 => default,
        value => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> PredictionForm {
        PredictionForm {
            ticker: "  msft ".to_string(),
            start: "2020-01-01".to_string(),
            end: "2024-01-01".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_numbers_take_defaults() {
        let request = form().to_request();
        assert_eq!(request.lookback, 60);
        assert_eq!(request.epochs, 10);
        assert_eq!(request.future_days, 30);
        assert_eq!(request.batch_size, 32);
        assert!(!request.force_retrain);
    }

    #[test]
    fn test_ticker_is_trimmed_not_rewritten() {
        assert_eq!(form().to_request().ticker, "msft");
    }

    #[test]
    fn test_non_numeric_values_take_defaults() {
        let mut form = form();
        form.lookback = Some("sixty".to_string());
        form.epochs = Some("".to_string());
        form.future_days = Some("-4".to_string());

        let request = form.to_request();
        assert_eq!(request.lookback, 60);
        assert_eq!(request.epochs, 10);
        assert_eq!(request.future_days, 30);
    }

    #[test]
    fn test_valid_numbers_pass_through() {
        let mut form = form();
        form.lookback = Some(" 90 ".to_string());
        form.epochs = Some("3".to_string());
        form.future_days = Some("0".to_string());
        form.batch_size = Some("64".to_string());
        form.force_retrain = Some(true);

        let request = form.to_request();
        assert_eq!(request.lookback, 90);
        assert_eq!(request.epochs, 3);
        assert_eq!(request.future_days, 0);
        assert_eq!(request.batch_size, 64);
        assert!(request.force_retrain);
    }

    #[test]
    fn test_zero_lookback_is_replaced() {
        let mut form = form();
        form.lookback = Some("0".to_string());
        form.epochs = Some("0".to_string());

        let request = form.to_request();
        assert_eq!(request.lookback, 60);
        assert_eq!(request.epochs, 10);
    }
}
