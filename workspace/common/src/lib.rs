//! Common transport-layer types shared between the forecasting service and
//! every front end (browser and command line).
//! These structs mirror the service's request/response payloads so each
//! client can (de)serialize them without duplicating shapes.

mod error;
mod form;

pub use error::{ErrorBody, RequestError};
pub use form::{
    PredictionForm, DEFAULT_BATCH_SIZE, DEFAULT_EPOCHS, DEFAULT_FUTURE_DAYS, DEFAULT_LOOKBACK,
};

use serde::{Deserialize, Serialize};

/// Path of the prediction endpoint, relative to the API base URL.
pub const PREDICT_ENDPOINT: &str = "/api/predict";
/// Path of the liveness probe.
pub const HEALTH_ENDPOINT: &str = "/api/health";
/// Path listing the models the service has saved to disk.
pub const MODELS_ENDPOINT: &str = "/api/models";
/// Path deleting a saved model.
pub const DELETE_MODEL_ENDPOINT: &str = "/api/delete_model";

// ===================== Prediction =====================

/// Request body for `POST /api/predict`.
///
/// Built fresh for every submission and never mutated after it is sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRequest {
    /// Trimmed ticker symbol, e.g. `AAPL`.
    pub ticker: String,
    /// First day of the training range (`YYYY-MM-DD`).
    pub start: String,
    /// Last day of the training range (`YYYY-MM-DD`).
    pub end: String,
    /// Number of past steps the model conditions on.
    pub lookback: u32,
    pub epochs: u32,
    /// Forecast horizon beyond the last historical date. Zero disables it.
    pub future_days: u32,
    pub batch_size: u32,
    /// Ignore a saved model and train from scratch.
    pub force_retrain: bool,
}

/// Success body of `POST /api/predict`.
///
/// Array fields are permissive: a missing array deserializes as empty so a
/// partial response still produces a (degraded) chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PredictionResponse {
    #[serde(default)]
    pub ticker: String,
    pub rmse: f64,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub actual: Vec<f64>,
    #[serde(default)]
    pub predicted: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_dates: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_preds: Option<Vec<f64>>,
    /// Where the service stored the model, when it reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<String>,
}

impl PredictionResponse {
    /// Number of historical points.
    pub fn point_count(&self) -> usize {
        self.dates.len()
    }

    /// Future dates and predictions, only when both are present and non-empty.
    pub fn future(&self) -> Option<(&[String], &[f64])> {
        match (&self.future_dates, &self.future_preds) {
            (Some(dates), Some(preds)) if !dates.is_empty() && !preds.is_empty() => {
                Some((dates.as_slice(), preds.as_slice()))
            }
            _ => None,
        }
    }
}

// ===================== Service health =====================

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

// ===================== Saved models =====================

/// One saved model as reported by `GET /api/models`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    pub ticker: String,
    pub path: String,
}

/// Body of `GET /api/models`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ModelsResponse {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

/// Request body for `POST /api/delete_model`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteModelRequest {
    pub ticker: String,
}

/// Success body of `POST /api/delete_model`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteModelResponse {
    /// Path of the removed model file.
    pub deleted: String,
}
