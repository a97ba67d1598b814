pub mod client;

use async_trait::async_trait;
use thiserror::Error;

pub use client::WorkflowApiClient;

/// Ошибки обращения к внешнему workflow
///
/// Ни одна из них не доходит до клиента dashboard-а: вызывающий код
/// превращает их в пустой (или резервный) результат.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("workflow request timed out")]
    Timeout,

    #[error("workflow transport error: {0}")]
    Transport(String),

    #[error("workflow returned status {status}")]
    Status { status: u16 },

    #[error("workflow response is not valid JSON: {0}")]
    Decode(String),
}

/// Источник оценок возвратов (внешний workflow)
#[async_trait]
pub trait JudgmentSource: Send + Sync {
    /// Последний ответ workflow как есть, без нормализации
    async fn fetch_latest(&self) -> Result<serde_json::Value, UpstreamError>;
}
