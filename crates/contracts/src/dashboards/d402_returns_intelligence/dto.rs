use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::a025_return_judgment::aggregate::JudgmentRecord;

/// KPI dashboard-а возвратов
///
/// Default - нулевая сводка (нет данных или workflow недоступен).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub analyzed_returns: u64,
    /// Сумма refund_amount по текущей выборке
    pub total_value: f64,
    /// Доля отклоненных, % (0..=100)
    pub avg_return_rate: u32,
    pub avg_fraud_score: f64,
    pub exclusive_cod_users: u64,
    pub high_risk_count: u64,
    pub reject_count: u64,
    pub approve_count: u64,
    pub review_count: u64,
}

/// Query parameters for GET /api/returns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReturnsQuery {
    /// Substring over customer name, mobile, shipment id and city
    #[serde(default)]
    pub search: Option<String>,
    /// Exact decision value ("reject", "approve", "manual_review", ...)
    #[serde(default)]
    pub decision: Option<String>,
    /// "high" | "medium" | "low" (без учета регистра); "all" - без фильтра
    #[serde(default)]
    pub risk: Option<String>,
}

/// Response for GET /api/returns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnsResponse {
    pub success: bool,
    pub summary: DashboardSummary,
    pub returns: Vec<JudgmentRecord>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
