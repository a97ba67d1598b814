use std::collections::HashSet;

use contracts::domain::a025_return_judgment::aggregate::{Decision, JudgmentRecord, COD_FLAGS};
use serde_json::Value;

use super::raw::RawJudgment;

/// Резервный пинкод, когда workflow его не прислал
pub const FALLBACK_PINCODE: &str = "400001";
pub const UNKNOWN: &str = "Unknown";

/// Преобразовать одну сырую оценку в каноническую запись
///
/// Чистая функция: индекс влияет только на резервный id.
pub fn map_judgment(value: &Value, index: usize) -> JudgmentRecord {
    let raw = RawJudgment::from_value(value);

    let id = raw
        .shipment_id
        .clone()
        .unwrap_or_else(|| format!("return-{}", index));

    // "undefined" приходит строкой из старых версий workflow
    let user_id = raw.user_id.filter(|u| u != "undefined");
    let user_name = match (&raw.user_name, &user_id) {
        (Some(name), _) => name.clone(),
        (None, Some(user_id)) => format!("User {}", user_id),
        (None, None) => "Anonymous User".to_string(),
    };

    let mut seen = HashSet::new();
    let pattern_flags: Vec<String> = raw
        .key_flags
        .into_iter()
        .filter(|flag| seen.insert(flag.clone()))
        .collect();
    let is_cod = pattern_flags
        .iter()
        .any(|flag| COD_FLAGS.contains(&flag.as_str()));

    let delivery_state = raw.delivery_state.unwrap_or_else(|| UNKNOWN.to_string());
    let (delivery_pincode, delivery_pincode_inferred) = match raw.delivery_pincode {
        Some(pincode) => (pincode, false),
        None => (FALLBACK_PINCODE.to_string(), true),
    };

    JudgmentRecord {
        id,
        order_id: raw.order_id,
        user_id: user_id.unwrap_or_else(|| "anonymous".to_string()),
        user_name,
        user_email: raw.user_email.unwrap_or_else(|| "N/A".to_string()),
        user_mobile: raw.user_mobile.unwrap_or_else(|| "N/A".to_string()),
        shipment_id: raw.shipment_id,
        item_name: "Fashion Item".to_string(),
        refund_amount: non_negative(raw.refund_amount),
        total_value: non_negative(raw.total_value),
        payment_mode: "COD".to_string(),
        is_cod,
        delivery_city: delivery_state.clone(),
        delivery_state,
        delivery_pincode,
        delivery_pincode_inferred,
        reason_text: raw
            .explanation
            .unwrap_or_else(|| "Return requested".to_string()),
        segment: raw.segment,
        fraud_score: raw.fraud_score,
        decision: raw.decision.map(Decision::from),
        confidence: raw.confidence,
        flag_count: pattern_flags.len(),
        pattern_flags,
        incentive: raw.incentive,
        recommended_action: raw.recommended_action,
        reasoning: raw.reasoning,
        weighted_breakdown: raw.weighted_breakdown,
        prime_score: raw.prime_score,
    }
}

fn non_negative(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(0.0)
}

/// Преобразовать всю пачку; повторный id получает суффикс `-{index}`
pub fn map_all(raw_judgments: &[Value]) -> Vec<JudgmentRecord> {
    let mut used_ids = HashSet::new();
    raw_judgments
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let mut record = map_judgment(value, index);
            if !used_ids.insert(record.id.clone()) {
                record.id = format!("{}-{}", record.id, index);
                used_ids.insert(record.id.clone());
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a025_return_judgment::normalizer::normalize;
    use contracts::enums::risk_tier::RiskTier;
    use serde_json::json;

    #[test]
    fn test_defaults_for_empty_judgment() {
        let record = map_judgment(&json!({}), 4);
        assert_eq!(record.id, "return-4");
        assert_eq!(record.user_id, "anonymous");
        assert_eq!(record.user_name, "Anonymous User");
        assert_eq!(record.user_email, "N/A");
        assert_eq!(record.refund_amount, 0.0);
        assert_eq!(record.delivery_state, "Unknown");
        assert_eq!(record.delivery_city, "Unknown");
        assert_eq!(record.delivery_pincode, FALLBACK_PINCODE);
        assert!(record.delivery_pincode_inferred);
        assert_eq!(record.reason_text, "Return requested");
        assert!(record.pattern_flags.is_empty());
        assert_eq!(record.flag_count, 0);
        assert!(!record.is_cod);
        assert!(record.decision.is_none());
        assert_eq!(record.risk_tier(), RiskTier::Low);
    }

    #[test]
    fn test_user_name_rules() {
        assert_eq!(
            map_judgment(&json!({ "user_id": "undefined" }), 0).user_name,
            "Anonymous User"
        );
        let record = map_judgment(&json!({ "user_id": 77 }), 0);
        assert_eq!(record.user_name, "User 77");
        assert_eq!(record.user_id, "77");
        assert_eq!(
            map_judgment(&json!({ "user_id": "77", "user_name": "Asha" }), 0).user_name,
            "Asha"
        );
    }

    #[test]
    fn test_flags_drive_count_cod_and_tier() {
        let record = map_judgment(
            &json!({
                "shipment_id": "S1",
                "key_flags": ["exclusive_cod_user", "rapid_returns", "high_cod_dependency", "rapid_returns"]
            }),
            0,
        );
        assert_eq!(record.pattern_flags.len(), 3);
        assert_eq!(record.flag_count, record.pattern_flags.len());
        assert!(record.is_cod);
        assert!(record.is_high_risk());

        let record = map_judgment(&json!({ "key_flags": ["high_cod_dependency"] }), 0);
        assert!(record.is_cod);
        assert_eq!(record.risk_tier(), RiskTier::Medium);
    }

    #[test]
    fn test_negative_refund_is_clamped() {
        let record = map_judgment(&json!({ "refund_amount": -50, "total_value": "1200.5" }), 0);
        assert_eq!(record.refund_amount, 0.0);
        assert_eq!(record.total_value, 1200.5);
    }

    #[test]
    fn test_passthrough_fields_are_unmodified() {
        let reasoning = json!({ "text": "t", "behavioral": "b", "history": "h" });
        let breakdown = json!({ "text_score": 2.5, "behavioral_score": 3.0, "history_score": 1.0 });
        let record = map_judgment(
            &json!({
                "shipment_id": "S9",
                "decision": "escalate",
                "fraud_score": 6.5,
                "confidence": 0.82,
                "reasoning": reasoning,
                "weighted_breakdown": breakdown,
                "prime_score": 71,
                "segment": "loyal"
            }),
            0,
        );
        assert_eq!(record.decision, Some(Decision::Other("escalate".to_string())));
        assert_eq!(record.fraud_score, Some(6.5));
        assert_eq!(record.confidence, Some(0.82));
        assert_eq!(record.reasoning, Some(reasoning));
        assert_eq!(record.weighted_breakdown, Some(breakdown));
        assert_eq!(record.prime_score, Some(json!(71)));
        assert_eq!(record.segment, Some(json!("loyal")));
    }

    #[test]
    fn test_map_all_keeps_ids_unique() {
        let records = map_all(&[
            json!({ "shipment_id": "S1" }),
            json!({ "shipment_id": "S1" }),
            json!({}),
        ]);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S1-1", "return-2"]);
    }

    #[test]
    fn test_all_shapes_produce_identical_records() {
        let judgments = json!([
            {
                "shipment_id": "S1",
                "user_id": "u1",
                "delivery_state": "Delhi",
                "delivery_pincode": "110001",
                "key_flags": ["exclusive_cod_user", "rapid_returns", "high_cod_dependency"],
                "fraud_score": 8,
                "decision": "reject",
                "refund_amount": 1500
            },
            {
                "shipment_id": "S2",
                "key_flags": [],
                "decision": "approve",
                "refund_amount": 300
            }
        ]);

        let shapes = [
            judgments.clone(),
            json!({ "latest_data": { "judgments": judgments.clone() } }),
            json!({ "response_body": { "latest_data": { "judgments": judgments.clone() } } }),
            json!({ "latest_data": { "judgments": [{ "returns_analysis": judgments.clone() }] } }),
            json!({ "data": [
                { "output": { "judgments": [judgments[0].clone()] } },
                { "output": { "judgments": [judgments[1].clone()] } }
            ] }),
        ];

        let expected = map_all(&normalize(&shapes[0]).raw_judgments);
        assert_eq!(expected.len(), 2);
        for shape in &shapes[1..] {
            assert_eq!(map_all(&normalize(shape).raw_judgments), expected);
        }
    }
}
