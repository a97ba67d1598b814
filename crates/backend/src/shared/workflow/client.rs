use async_trait::async_trait;
use std::time::Duration;

use super::{JudgmentSource, UpstreamError};

/// HTTP-клиент внешнего workflow с оценками возвратов
pub struct WorkflowApiClient {
    client: reqwest::Client,
    url: String,
}

impl WorkflowApiClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl JudgmentSource for WorkflowApiClient {
    async fn fetch_latest(&self) -> Result<serde_json::Value, UpstreamError> {
        tracing::info!("Fetching returns intelligence data from workflow");

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(200).collect();
            tracing::error!("Workflow request failed with status {}: {}", status, preview);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(map_transport_error)?;
        tracing::debug!("Workflow response size: {} bytes", body.len());

        serde_json::from_str::<serde_json::Value>(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            tracing::error!("Failed to parse workflow response: {}. Body: {}", e, preview);
            UpstreamError::Decode(e.to_string())
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Transport(e.to_string())
    }
}
