use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Сценарий тестового возврата
///
/// Любое значение кроме "fraud" считается чистым сценарием.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Scenario {
    #[default]
    Clean,
    Fraud,
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Clean => "clean",
            Scenario::Fraud => "fraud",
        }
    }

    pub fn is_fraud(&self) -> bool {
        matches!(self, Scenario::Fraud)
    }
}

impl From<String> for Scenario {
    fn from(value: String) -> Self {
        if value == "fraud" {
            Scenario::Fraud
        } else {
            Scenario::Clean
        }
    }
}

impl From<Scenario> for String {
    fn from(value: Scenario) -> Self {
        value.as_str().to_string()
    }
}

/// Запрос на симуляцию возврата (POST /api/simulate-return)
///
/// Каждое поле разбирается отдельно: поле неожиданного типа получает значение
/// по умолчанию, остальные поля запроса сохраняются.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateReturnRequest {
    #[serde(default, deserialize_with = "lenient_scenario")]
    pub scenario: Scenario,

    /// Строка или число; null и пустая строка - компания "1"
    #[serde(default = "default_company_id", deserialize_with = "lenient_company_id")]
    pub company_id: String,

    /// Переопределение причины возврата
    #[serde(default, deserialize_with = "lenient_text")]
    pub reason: Option<String>,

    /// Переопределение комментария покупателя
    #[serde(default, deserialize_with = "lenient_text")]
    pub comments: Option<String>,
}

fn default_company_id() -> String {
    "1".to_string()
}

fn lenient_scenario<'de, D: Deserializer<'de>>(d: D) -> Result<Scenario, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Scenario::from(s),
        _ => Scenario::Clean,
    })
}

fn lenient_company_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => default_company_id(),
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}

impl Default for SimulateReturnRequest {
    fn default() -> Self {
        Self {
            scenario: Scenario::default(),
            company_id: default_company_id(),
            reason: None,
            comments: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_defaults() {
        let request: SimulateReturnRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.scenario, Scenario::Clean);
        assert_eq!(request.company_id, "1");
    }

    #[test]
    fn test_unknown_scenario_is_clean() {
        let request: SimulateReturnRequest =
            serde_json::from_str(r#"{"scenario":"weird","company_id":"42"}"#).unwrap();
        assert_eq!(request.scenario, Scenario::Clean);
        assert_eq!(request.company_id, "42");

        let request: SimulateReturnRequest =
            serde_json::from_str(r#"{"scenario":"fraud"}"#).unwrap();
        assert!(request.scenario.is_fraud());
    }

    #[test]
    fn test_fields_with_wrong_types_keep_the_rest() {
        let request: SimulateReturnRequest =
            serde_json::from_str(r#"{"scenario":"fraud","company_id":5}"#).unwrap();
        assert!(request.scenario.is_fraud());
        assert_eq!(request.company_id, "5");

        let request: SimulateReturnRequest = serde_json::from_str(
            r#"{"scenario":"fraud","company_id":null,"comments":42,"reason":"Damaged"}"#,
        )
        .unwrap();
        assert!(request.scenario.is_fraud());
        assert_eq!(request.company_id, "1");
        assert!(request.comments.is_none());
        assert_eq!(request.reason.as_deref(), Some("Damaged"));

        let request: SimulateReturnRequest =
            serde_json::from_str(r#"{"scenario":7,"company_id":" 12 "}"#).unwrap();
        assert_eq!(request.scenario, Scenario::Clean);
        assert_eq!(request.company_id, "12");
    }
}
