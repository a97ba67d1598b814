use serde_json::{Map, Value};

/// Распознанная форма ответа workflow
///
/// Версии в ответе нет, форма определяется по содержимому.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `[{ shipment_id, ... }, ...]`
    DirectArray,
    /// `{ latest_data: { judgments, summary }, metadata }`
    RootWrapped,
    /// `{ response_body: { latest_data, metadata } }`
    LegacyWrapped,
    /// `{ data: [{ output: { judgments, summary } }, ...] }`
    OutputRecords,
    Unrecognized,
}

impl ResponseShape {
    pub fn name(&self) -> &'static str {
        match self {
            ResponseShape::DirectArray => "direct array",
            ResponseShape::RootWrapped => "latest_data",
            ResponseShape::LegacyWrapped => "response_body.latest_data",
            ResponseShape::OutputRecords => "data[].output",
            ResponseShape::Unrecognized => "unrecognized",
        }
    }
}

/// Плоский список сырых оценок плюс необязательные summary/metadata
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResponse {
    pub shape: ResponseShape,
    pub raw_judgments: Vec<Value>,
    pub summary: Map<String, Value>,
    pub metadata: Map<String, Value>,
}

impl NormalizedResponse {
    pub fn empty() -> Self {
        Self {
            shape: ResponseShape::Unrecognized,
            raw_judgments: Vec::new(),
            summary: Map::new(),
            metadata: Map::new(),
        }
    }
}

/// Значение присутствует и "истинно" (не null, не false, не пустая строка, не 0)
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
        Some(_) => true,
    }
}

fn as_object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}

fn non_empty_array(value: Option<&Value>) -> Option<&Vec<Value>> {
    value.and_then(Value::as_array).filter(|items| !items.is_empty())
}

/// Разобрать ответ workflow в плоский список оценок
///
/// Порядок проверки: прямой массив, `latest_data`, `response_body.latest_data`,
/// и только если они ничего не дали - `data[].output`. Никогда не падает.
pub fn normalize(payload: &Value) -> NormalizedResponse {
    // 1. Прямой массив оценок
    if let Some(items) = non_empty_array(Some(payload)) {
        if is_present(items[0].get("shipment_id")) {
            return NormalizedResponse {
                shape: ResponseShape::DirectArray,
                raw_judgments: items.clone(),
                summary: Map::new(),
                metadata: Map::new(),
            };
        }
    }

    let mut result = NormalizedResponse::empty();

    // 2/3. Обертка latest_data (в корне или внутри response_body)
    let wrapped = if is_present(payload.get("latest_data")) {
        Some((
            ResponseShape::RootWrapped,
            &payload["latest_data"],
            payload.get("metadata"),
        ))
    } else {
        payload
            .get("response_body")
            .filter(|body| is_present(body.get("latest_data")))
            .map(|body| {
                (
                    ResponseShape::LegacyWrapped,
                    &body["latest_data"],
                    body.get("metadata"),
                )
            })
    };

    if let Some((shape, latest_data, metadata)) = wrapped {
        result.shape = shape;
        if let Some(metadata) = as_object(metadata) {
            result.metadata = metadata.clone();
        }

        if let Some(judgments) = non_empty_array(latest_data.get("judgments")) {
            let first = &judgments[0];
            if let Some(nested) = first.get("returns_analysis").and_then(Value::as_array) {
                // Очень старый формат: пачка внутри первого элемента
                result.raw_judgments = nested.clone();
                if let Some(batch_summary) = as_object(first.get("batch_summary")) {
                    result.summary = batch_summary.clone();
                }
            } else if is_present(first.get("shipment_id")) {
                result.raw_judgments = judgments.clone();
            }
        }

        if let Some(summary) = as_object(latest_data.get("summary")) {
            result.summary = summary.clone();
        }
    }

    // 4. Самый старый формат: data[].output
    if result.raw_judgments.is_empty() {
        if let Some(records) = payload.get("data").and_then(Value::as_array) {
            let mut collected = Vec::new();
            let mut last_summary = None;
            for record in records {
                let Some(output) = record.get("output") else {
                    continue;
                };
                if let Some(judgments) = output.get("judgments").and_then(Value::as_array) {
                    collected.extend(judgments.iter().cloned());
                }
                if let Some(summary) = as_object(output.get("summary")) {
                    last_summary = Some(summary.clone());
                }
            }

            if !collected.is_empty() || last_summary.is_some() {
                result.shape = ResponseShape::OutputRecords;
                result.raw_judgments = collected;
                if let Some(summary) = last_summary {
                    result.summary = summary;
                }
            }
        }
    }

    result
}
