use anyhow::Result;
use tracing::{info, trace};

use crate::client::ApiClient;

pub async fn list_models(client: &ApiClient) -> Result<()> {
    trace!("Entering list_models command");
    let response = client.list_models().await?;

    if response.models.is_empty() {
        println!("No saved models");
        return Ok(());
    }

    for model in &response.models {
        println!("{:<10} {}", model.ticker, model.path);
    }
    info!("Listed {} models", response.models.len());
    Ok(())
}

pub async fn delete_model(client: &ApiClient, ticker: &str) -> Result<()> {
    trace!("Entering delete_model command");
    let response = client.delete_model(ticker).await?;

    info!(ticker, path = %response.deleted, "Model deleted");
    println!("Deleted {}", response.deleted);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::{spawn_stub_service, StubBehaviour};

    #[tokio::test]
    async fn test_list_models() {
        let base = spawn_stub_service(StubBehaviour::Succeed).await;
        assert!(list_models(&ApiClient::new(base)).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_unknown_model_reports_service_message() {
        let base = spawn_stub_service(StubBehaviour::Succeed).await;
        let err = delete_model(&ApiClient::new(base), "NOPE").await.unwrap_err();
        assert_eq!(err.to_string(), "model not found");
    }
}
