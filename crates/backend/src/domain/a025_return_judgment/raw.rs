use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Оценка возврата в том виде, в каком ее отдает workflow
///
/// Любое поле может отсутствовать или иметь неожиданный тип - такие поля
/// становятся None, запись целиком не отбрасывается.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJudgment {
    #[serde(default, deserialize_with = "lenient_string")]
    pub shipment_id: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub order_id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_mobile: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub refund_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub delivery_state: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub delivery_pincode: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub explanation: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub segment: Option<Value>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fraud_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub decision: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient_flags")]
    pub key_flags: Vec<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub incentive: Option<Value>,
    #[serde(default, deserialize_with = "non_null")]
    pub recommended_action: Option<Value>,
    #[serde(default, deserialize_with = "non_null")]
    pub reasoning: Option<Value>,
    #[serde(default, deserialize_with = "non_null")]
    pub weighted_breakdown: Option<Value>,
    #[serde(default, deserialize_with = "non_null")]
    pub prime_score: Option<Value>,
}

impl RawJudgment {
    /// Разбор одного элемента массива judgments; не-объект дает пустую запись
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
                tracing::warn!("Unreadable judgment object, using defaults: {}", e);
                RawJudgment::default()
            }),
            _ => RawJudgment::default(),
        }
    }
}

/// Строка; числа приводятся к строке, пустая строка считается отсутствием
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Число; строки с числом тоже принимаются
fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

/// Массив строк-флагов; прочие элементы игнорируются
fn lenient_flags<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn non_null<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Null => None,
        other => Some(other),
    })
}
