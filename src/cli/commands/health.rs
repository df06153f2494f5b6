use anyhow::{bail, Result};
use tracing::{debug, trace};

use crate::client::ApiClient;

pub async fn health(client: &ApiClient) -> Result<()> {
    trace!("Entering health command");
    let health = client.health().await?;
    debug!(status = %health.status, "Health response received");

    if !health.is_ok() {
        bail!("Service reported status '{}'", health.status);
    }

    println!("Service is {}", health.status);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::{closed_port_url, spawn_stub_service, StubBehaviour};

    #[tokio::test]
    async fn test_health_of_running_service() {
        let base = spawn_stub_service(StubBehaviour::Succeed).await;
        assert!(health(&ApiClient::new(base)).await.is_ok());
    }

    #[tokio::test]
    async fn test_health_of_unreachable_service() {
        let base = closed_port_url().await;
        assert!(health(&ApiClient::new(base)).await.is_err());
    }
}
