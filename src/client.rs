use async_trait::async_trait;
use chart::PredictionService;
use common::{
    DeleteModelRequest, DeleteModelResponse, HealthResponse, ModelsResponse, PredictionRequest,
    PredictionResponse, RequestError, DELETE_MODEL_ENDPOINT, HEALTH_ENDPOINT, MODELS_ENDPOINT,
    PREDICT_ENDPOINT,
};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, trace};

/// HTTP client for the forecasting service.
///
/// One call per operation: no retries, no caching, no timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Sends one prediction request.
    #[instrument(skip(self, request), fields(ticker = %request.ticker))]
    pub async fn submit(&self, request: &PredictionRequest) -> Result<PredictionResponse, RequestError> {
        let url = self.url(PREDICT_ENDPOINT);
        debug!("POST request to: {}", url);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(PREDICT_ENDPOINT, e))?;

        decode(PREDICT_ENDPOINT, response).await
    }

    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthResponse, RequestError> {
        let url = self.url(HEALTH_ENDPOINT);
        debug!("GET request to: {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(HEALTH_ENDPOINT, e))?;

        decode(HEALTH_ENDPOINT, response).await
    }

    #[instrument(skip(self))]
    pub async fn list_models(&self) -> Result<ModelsResponse, RequestError> {
        let url = self.url(MODELS_ENDPOINT);
        debug!("GET request to: {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(MODELS_ENDPOINT, e))?;

        decode(MODELS_ENDPOINT, response).await
    }

    #[instrument(skip(self))]
    pub async fn delete_model(&self, ticker: &str) -> Result<DeleteModelResponse, RequestError> {
        let url = self.url(DELETE_MODEL_ENDPOINT);
        debug!("POST request to: {}", url);

        let body = DeleteModelRequest {
            ticker: ticker.trim().to_string(),
        };
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(DELETE_MODEL_ENDPOINT, e))?;

        decode(DELETE_MODEL_ENDPOINT, response).await
    }
}

#[async_trait(?Send)]
impl PredictionService for ApiClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, RequestError> {
        self.submit(request).await
    }
}

fn transport_error(endpoint: &str, err: reqwest::Error) -> RequestError {
    let message = err.to_string();
    error!("{} - Request failed: {}", endpoint, message);
    RequestError::Transport(message)
}

async fn decode<T>(endpoint: &str, response: reqwest::Response) -> Result<T, RequestError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let status_text = status.canonical_reason().unwrap_or_default();
        let body = response.text().await.unwrap_or_default();
        return Err(RequestError::from_response(status.as_u16(), status_text, &body));
    }

    trace!("{} - Response received, parsing JSON", endpoint);
    let parsed = response.json::<T>().await.map_err(|e| {
        error!("{} - Failed to parse response: {}", endpoint, e);
        RequestError::Decode(e.to_string())
    })?;

    info!("{} - Success", endpoint);
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::{closed_port_url, spawn_stub_service, StubBehaviour};

    fn request() -> PredictionRequest {
        PredictionRequest {
            ticker: "ABC".to_string(),
            start: "2024-01-01".to_string(),
            end: "2024-01-31".to_string(),
            lookback: 60,
            epochs: 10,
            future_days: 5,
            batch_size: 32,
            force_retrain: false,
        }
    }

    #[tokio::test]
    async fn test_submit_success() {
        let base = spawn_stub_service(StubBehaviour::Succeed).await;
        let client = ApiClient::new(format!("{}/", base));

        let response = client.submit(&request()).await.unwrap();
        assert_eq!(response.ticker, "ABC");
        assert_eq!(response.point_count(), 2);
        // The stub echoes the requested horizon.
        assert_eq!(response.future().unwrap().0.len(), 5);
    }

    #[tokio::test]
    async fn test_structured_service_error() {
        let base = spawn_stub_service(StubBehaviour::ModelFailed).await;
        let client = ApiClient::new(base);

        let err = client.submit(&request()).await.unwrap_err();
        assert_eq!(err, RequestError::Service {
            status: 500,
            message: "model failed".to_string(),
        });
    }

    #[tokio::test]
    async fn test_unstructured_service_error_uses_status_text() {
        let base = spawn_stub_service(StubBehaviour::BadGateway).await;
        let client = ApiClient::new(base);

        let err = client.submit(&request()).await.unwrap_err();
        assert_eq!(err.message(), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_undecodable_success_body() {
        let base = spawn_stub_service(StubBehaviour::Garbage).await;
        let client = ApiClient::new(base);

        let err = client.submit(&request()).await.unwrap_err();
        assert!(matches!(err, RequestError::Decode(_)));
    }

    #[tokio::test]
    async fn test_transport_error() {
        let client = ApiClient::new(closed_port_url().await);

        let err = client.submit(&request()).await.unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)));
        assert!(!err.message().is_empty());
    }

    #[tokio::test]
    async fn test_health_and_models() {
        let base = spawn_stub_service(StubBehaviour::Succeed).await;
        let client = ApiClient::new(base);

        assert!(client.health().await.unwrap().is_ok());

        let models = client.list_models().await.unwrap();
        assert_eq!(models.models.len(), 1);
        assert_eq!(models.models[0].ticker, "ABC");
    }

    #[tokio::test]
    async fn test_delete_model() {
        let base = spawn_stub_service(StubBehaviour::Succeed).await;
        let client = ApiClient::new(base);

        let deleted = client.delete_model(" ABC ").await.unwrap();
        assert_eq!(deleted.deleted, "models/ABC.h5");

        let err = client.delete_model("NOPE").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.message(), "model not found");
    }
}
