use async_trait::async_trait;
use chart::PredictionService;
use common::{
    DeleteModelRequest, DeleteModelResponse, HealthResponse, ModelsResponse, PredictionRequest,
    PredictionResponse, RequestError, DELETE_MODEL_ENDPOINT, HEALTH_ENDPOINT, MODELS_ENDPOINT,
    PREDICT_ENDPOINT,
};
use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::settings;

fn api_url(endpoint: &str) -> String {
    settings::get_settings().api_url(endpoint)
}

fn transport_error(method: &str, endpoint: &str, err: gloo_net::Error) -> RequestError {
    let message = err.to_string();
    log::error!("{} {} - Request failed: {}", method, endpoint, message);
    RequestError::Transport(message)
}

async fn decode<T>(method: &str, endpoint: &str, response: Response) -> Result<T, RequestError>
where
    T: DeserializeOwned,
{
    if !response.ok() {
        log::warn!("{} {} - Non-OK response: {}", method, endpoint, response.status());
        let status_text = response.status_text();
        let body = response.text().await.unwrap_or_default();
        let err = RequestError::from_response(response.status(), &status_text, &body);
        log::error!("{} {} - API error: {}", method, endpoint, err);
        return Err(err);
    }

    log::trace!("{} {} - Response received, parsing JSON", method, endpoint);
    let parsed = response.json::<T>().await.map_err(|e| {
        log::error!("{} {} - Failed to parse response: {}", method, endpoint, e);
        RequestError::Decode(e.to_string())
    })?;

    log::info!("{} {} - Success", method, endpoint);
    Ok(parsed)
}

/// Common GET request handler
pub async fn get<T>(endpoint: &str) -> Result<T, RequestError>
where
    T: DeserializeOwned,
{
    let url = api_url(endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| transport_error("GET", endpoint, e))?;

    decode("GET", endpoint, response).await
}

/// Common POST request handler
pub async fn post<T, B>(endpoint: &str, body: &B) -> Result<T, RequestError>
where
    T: DeserializeOwned,
    B: Serialize,
{
    let url = api_url(endpoint);
    log::debug!("POST request to: {}", url);

    let response = Request::post(&url)
        .json(body)
        .map_err(|e| transport_error("POST", endpoint, e))?
        .send()
        .await
        .map_err(|e| transport_error("POST", endpoint, e))?;

    decode("POST", endpoint, response).await
}

pub async fn health() -> Result<HealthResponse, RequestError> {
    get(HEALTH_ENDPOINT).await
}

pub async fn list_models() -> Result<ModelsResponse, RequestError> {
    get(MODELS_ENDPOINT).await
}

pub async fn delete_model(ticker: &str) -> Result<DeleteModelResponse, RequestError> {
    let body = DeleteModelRequest {
        ticker: ticker.trim().to_string(),
    };
    post(DELETE_MODEL_ENDPOINT, &body).await
}

/// Browser-side prediction client. One request per submission.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PredictionClient;

#[async_trait(?Send)]
impl PredictionService for PredictionClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, RequestError> {
        log::trace!("Requesting prediction for {}", request.ticker);
        post(PREDICT_ENDPOINT, request).await
    }
}
