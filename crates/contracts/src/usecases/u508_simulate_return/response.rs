use serde::{Deserialize, Serialize};

use super::request::Scenario;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedCustomer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub account_age_days: u32,
    pub previous_returns: u32,
    pub total_orders: u32,
    pub return_rate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedOrder {
    pub id: String,
    pub total: f64,
    pub placed_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedProduct {
    pub id: String,
    pub name: String,
    pub variant: String,
    pub price: f64,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnDetails {
    pub reason: String,
    pub reason_text: String,
    pub comments: String,
    pub requested_at: String,
}

/// Индикаторы риска, переключаемые сценарием
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskIndicators {
    pub new_account: bool,
    pub high_return_rate: bool,
    pub mismatched_address: bool,
    pub temp_email: bool,
    pub rapid_returns: bool,
}

impl RiskIndicators {
    pub fn all(value: bool) -> Self {
        Self {
            new_account: value,
            high_return_rate: value,
            mismatched_address: value,
            temp_email: value,
            rapid_returns: value,
        }
    }
}

/// Синтетическое событие `return.requested`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnEventPayload {
    pub event: String,
    pub company_id: String,
    pub return_id: String,
    pub order_id: String,
    pub customer_id: String,
    pub customer: SimulatedCustomer,
    pub order: SimulatedOrder,
    pub product: SimulatedProduct,
    pub return_details: ReturnDetails,
    pub risk_indicators: RiskIndicators,
    pub amount: f64,
    pub scenario: Scenario,
    pub images: Vec<String>,
}

/// Ответ на симуляцию возврата
///
/// success всегда true, ошибка пересылки видна только в note/boltic_error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateReturnResponse {
    pub success: bool,
    pub message: String,
    pub payload: ReturnEventPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boltic_status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boltic_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
