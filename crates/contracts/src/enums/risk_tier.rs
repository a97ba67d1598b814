use serde::{Deserialize, Serialize};

/// Уровень риска (High/Medium/Low)
///
/// Пороги зависят от уровня агрегации: для отдельного возврата считается
/// количество флагов, для пинкода и штата - количество возвратов высокого риска.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl RiskTier {
    /// Флагов >= 3 - High, 1..=2 - Medium, 0 - Low
    pub fn from_flag_count(flag_count: usize) -> Self {
        match flag_count {
            0 => RiskTier::Low,
            1 | 2 => RiskTier::Medium,
            _ => RiskTier::High,
        }
    }

    /// Уровень риска пинкода: highRiskCount >= 3 - High, >= 1 - Medium
    pub fn for_pincode(high_risk_count: u64) -> Self {
        if high_risk_count >= 3 {
            RiskTier::High
        } else if high_risk_count >= 1 {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    /// Уровень риска штата: highRiskCount >= 5 - High, >= 2 - Medium
    ///
    /// Пороги выше, чем у пинкода: штат накапливает возвраты со всех своих пинкодов.
    pub fn for_state(high_risk_count: u64) -> Self {
        if high_risk_count >= 5 {
            RiskTier::High
        } else if high_risk_count >= 2 {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    /// Разбор значения фильтра без учета регистра
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(RiskTier::High),
            "medium" => Some(RiskTier::Medium),
            "low" => Some(RiskTier::Low),
            _ => None,
        }
    }

    /// Короткая подпись для таблиц отчета
    pub fn short_label(&self) -> &'static str {
        match self {
            RiskTier::High => "High",
            RiskTier::Medium => "Med",
            RiskTier::Low => "Low",
        }
    }
}
