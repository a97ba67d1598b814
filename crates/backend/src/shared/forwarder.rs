use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Ошибки пересылки во внешнюю автоматизацию мерчанта
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("forward request timed out")]
    Timeout,

    #[error("forward transport error: {0}")]
    Transport(String),

    #[error("forward target returned status {status}")]
    Status { status: u16, body: String },
}

impl ForwardError {
    /// Короткое описание для поля `boltic_error` (код статуса или сообщение)
    pub fn short_description(&self) -> String {
        match self {
            ForwardError::Status { status, .. } => status.to_string(),
            other => other.to_string(),
        }
    }
}

/// Пересылка JSON-payload на URL мерчанта
#[async_trait]
pub trait Forwarder: Send + Sync {
    /// POST payload, возвращает HTTP статус при успехе
    async fn forward(&self, url: &str, payload: &serde_json::Value) -> Result<u16, ForwardError>;
}

/// reqwest-реализация с таймаутом на весь запрос
pub struct HttpForwarder {
    client: reqwest::Client,
}

impl HttpForwarder {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(&self, url: &str, payload: &serde_json::Value) -> Result<u16, ForwardError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ForwardError::Timeout
                } else {
                    ForwardError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ForwardError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(status.as_u16())
    }
}

/// Переслать payload в фоне, результат только логируется
///
/// Ответ на исходный HTTP-запрос не ждет этой задачи, порядок завершения
/// пересылки и отправки ответа не определен.
pub fn spawn_forward(
    forwarder: Arc<dyn Forwarder>,
    url: String,
    payload: serde_json::Value,
    label: String,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match forwarder.forward(&url, &payload).await {
            Ok(status) => {
                tracing::info!("Forwarded {} | Status: {}", label, status);
            }
            Err(ForwardError::Status { status, body }) => {
                let preview: String = body.chars().take(300).collect();
                tracing::error!("Forward of {} failed with status {}: {}", label, status, preview);
            }
            Err(e) => {
                tracing::error!("Forward of {} failed: {}", label, e);
            }
        }
    })
}
