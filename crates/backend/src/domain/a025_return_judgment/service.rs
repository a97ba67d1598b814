use contracts::domain::a025_return_judgment::aggregate::JudgmentRecord;
use serde_json::{Map, Value};

use super::mapper::map_all;
use super::normalizer::{normalize, ResponseShape};
use crate::shared::workflow::{JudgmentSource, UpstreamError};

/// Пачка канонических записей одного ответа workflow
///
/// Каждый потребитель (dashboard, карта, отчет) получает свою пачку,
/// между запросами ничего не кэшируется.
#[derive(Debug, Clone)]
pub struct JudgmentBatch {
    pub shape: ResponseShape,
    pub records: Vec<JudgmentRecord>,
    /// Summary от workflow, если он его прислал
    pub summary: Map<String, Value>,
    pub metadata: Map<String, Value>,
}

impl JudgmentBatch {
    pub fn empty() -> Self {
        Self {
            shape: ResponseShape::Unrecognized,
            records: Vec::new(),
            summary: Map::new(),
            metadata: Map::new(),
        }
    }

    /// Нормализация + маппинг уже полученного ответа
    pub fn from_payload(payload: &Value) -> Self {
        let normalized = normalize(payload);
        if normalized.shape == ResponseShape::Unrecognized {
            tracing::warn!("Unrecognized workflow response shape, treating as no data");
        } else {
            tracing::info!(
                "Workflow response shape: {} ({} judgments)",
                normalized.shape.name(),
                normalized.raw_judgments.len()
            );
        }

        Self {
            shape: normalized.shape,
            records: map_all(&normalized.raw_judgments),
            summary: normalized.summary,
            metadata: normalized.metadata,
        }
    }
}

/// Получить и разобрать последний ответ workflow
///
/// Ошибка сети возвращается как есть, решение о деградации принимает
/// обработчик конкретного endpoint-а.
pub async fn fetch_batch(source: &dyn JudgmentSource) -> Result<JudgmentBatch, UpstreamError> {
    let payload = source.fetch_latest().await?;
    Ok(JudgmentBatch::from_payload(&payload))
}
