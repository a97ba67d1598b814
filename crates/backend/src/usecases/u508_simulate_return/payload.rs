use chrono::{DateTime, Duration, Utc};
use contracts::domain::a026_merchant_config::aggregate::MerchantRules;
use contracts::usecases::u508_simulate_return::response::{
    ReturnDetails, RiskIndicators, SimulatedCustomer, SimulatedOrder, SimulatedProduct,
};
use contracts::usecases::u508_simulate_return::{ReturnEventPayload, SimulateReturnRequest};
use rand::Rng;
use serde_json::Value;
use uuid::Uuid;

pub const RETURN_REQUESTED: &str = "return.requested";

const PRODUCT_PRICE: f64 = 1299.0;

/// Тестовое событие возврата для выбранного сценария
///
/// Покупатель и индикаторы риска фиксированы для сценария, id возврата
/// и заказа генерируются заново.
pub fn build_mock_payload(request: &SimulateReturnRequest, now: DateTime<Utc>) -> ReturnEventPayload {
    let fraud = request.scenario.is_fraud();

    let return_id = format!(
        "RTN-{}",
        Uuid::new_v4().simple().to_string()[..10].to_uppercase()
    );
    let order_id = format!("ORD-2024-{}", rand::thread_rng().gen_range(10000..=99999));

    let customer = if fraud {
        SimulatedCustomer {
            id: "cust_suspicious_001".to_string(),
            name: "John Doe".to_string(),
            email: "temp_email_xyz@tempmail.com".to_string(),
            phone: "+91 0000000000".to_string(),
            account_age_days: 3,
            previous_returns: 12,
            total_orders: 14,
            return_rate: "85.7%".to_string(),
        }
    } else {
        SimulatedCustomer {
            id: "cust_verified_042".to_string(),
            name: "Sarah Johnson".to_string(),
            email: "sarah.johnson@gmail.com".to_string(),
            phone: "+91 9876543210".to_string(),
            account_age_days: 847,
            previous_returns: 1,
            total_orders: 23,
            return_rate: "4.3%".to_string(),
        }
    };

    let (reason, reason_text, comments, days_ago, image) = if fraud {
        (
            "color",
            "Wrong color received",
            "Product is totally different from what I ordered!!!",
            2,
            "https://images.pexels.com/photos/991509/pexels-photo-991509.jpeg",
        )
    } else {
        (
            "size",
            "Size too small",
            "Would like to exchange for XL if possible.",
            5,
            "https://images.pexels.com/photos/220453/pexels-photo-220453.jpeg",
        )
    };

    ReturnEventPayload {
        event: RETURN_REQUESTED.to_string(),
        company_id: request.company_id.clone(),
        return_id,
        order_id: order_id.clone(),
        customer_id: customer.id.clone(),
        customer,
        order: SimulatedOrder {
            id: order_id,
            total: PRODUCT_PRICE,
            placed_at: (now - Duration::days(days_ago)).to_rfc3339(),
        },
        product: SimulatedProduct {
            id: "prod_shirt_001".to_string(),
            name: "Premium Cotton Classic Fit Shirt".to_string(),
            variant: "Size: L • Color: Navy Blue".to_string(),
            price: PRODUCT_PRICE,
            category: "Apparel".to_string(),
        },
        return_details: ReturnDetails {
            reason: request.reason.clone().unwrap_or_else(|| reason.to_string()),
            reason_text: reason_text.to_string(),
            comments: request
                .comments
                .clone()
                .unwrap_or_else(|| comments.to_string()),
            requested_at: now.to_rfc3339(),
        },
        risk_indicators: RiskIndicators::all(fraud),
        amount: PRODUCT_PRICE,
        scenario: request.scenario,
        images: vec![image.to_string()],
    }
}

/// Добавить правила мерчанта и отметку времени перед пересылкой
pub fn enrich_event(mut event: Value, rules: &MerchantRules, now: DateTime<Utc>) -> Value {
    if let Value::Object(map) = &mut event {
        map.insert(
            "merchant_rules".to_string(),
            serde_json::to_value(rules).unwrap_or(Value::Null),
        );
        map.insert("timestamp".to_string(), Value::String(now.to_rfc3339()));
    }
    event
}
