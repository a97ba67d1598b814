use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::risk_tier::RiskTier;

/// Флаги, указывающие на оплату при получении (COD)
pub const COD_FLAGS: [&str; 2] = ["high_cod_dependency", "exclusive_cod_user"];

/// Рекомендованное решение по возврату
///
/// Неизвестные значения сохраняются как есть в `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Decision {
    Reject,
    Approve,
    ManualReview,
    Other(String),
}

impl Decision {
    pub fn as_str(&self) -> &str {
        match self {
            Decision::Reject => "reject",
            Decision::Approve => "approve",
            Decision::ManualReview => "manual_review",
            Decision::Other(value) => value.as_str(),
        }
    }
}

impl From<String> for Decision {
    fn from(value: String) -> Self {
        match value.as_str() {
            "reject" => Decision::Reject,
            "approve" => Decision::Approve,
            "manual_review" => Decision::ManualReview,
            _ => Decision::Other(value),
        }
    }
}

impl From<Decision> for String {
    fn from(value: Decision) -> Self {
        match value {
            Decision::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// Каноническая запись оценки возврата (одна отправка)
///
/// Создается заново при каждом запросе к внешнему workflow и живет
/// только в пределах одного ответа.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgmentRecord {
    /// shipment_id или позиционный `return-{index}`
    pub id: String,
    #[serde(default)]
    pub order_id: Option<Value>,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_mobile: String,
    #[serde(default)]
    pub shipment_id: Option<String>,
    pub item_name: String,
    pub refund_amount: f64,
    pub total_value: f64,
    pub payment_mode: String,
    pub is_cod: bool,
    pub delivery_city: String,
    pub delivery_state: String,
    pub delivery_pincode: String,
    /// true, если пинкод не пришел и подставлен резервный
    #[serde(default)]
    pub delivery_pincode_inferred: bool,
    pub reason_text: String,
    #[serde(default)]
    pub segment: Option<Value>,
    #[serde(default)]
    pub fraud_score: Option<f64>,
    #[serde(default)]
    pub decision: Option<Decision>,
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Флаги подозрительных паттернов (без повторов)
    pub pattern_flags: Vec<String>,
    pub flag_count: usize,
    #[serde(default)]
    pub incentive: Option<Value>,
    #[serde(default)]
    pub recommended_action: Option<Value>,
    #[serde(default)]
    pub reasoning: Option<Value>,
    #[serde(default)]
    pub weighted_breakdown: Option<Value>,
    #[serde(default)]
    pub prime_score: Option<Value>,
}

impl JudgmentRecord {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.pattern_flags.iter().any(|f| f == flag)
    }

    pub fn risk_tier(&self) -> RiskTier {
        RiskTier::from_flag_count(self.flag_count)
    }

    pub fn is_high_risk(&self) -> bool {
        self.risk_tier() == RiskTier::High
    }

    /// Пользователь платит только наличными (оба исторических написания флага)
    pub fn is_exclusive_cod_user(&self) -> bool {
        self.has_flag("exclusive_cod_user") || self.has_flag("exclusive_cod")
    }

    pub fn decision_is(&self, decision: &Decision) -> bool {
        self.decision.as_ref() == Some(decision)
    }
}
