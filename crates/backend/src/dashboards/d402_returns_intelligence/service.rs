use contracts::dashboards::d402_returns_intelligence::dto::{DashboardSummary, ReturnsQuery};
use contracts::domain::a025_return_judgment::aggregate::{Decision, JudgmentRecord};
use contracts::enums::risk_tier::RiskTier;
use serde_json::{Map, Value};

/// Число из summary workflow; null и нечисловые значения считаются отсутствием
fn number_field(summary: &Map<String, Value>, key: &str) -> Option<f64> {
    match summary.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Счетчик решения: `reject_count` (новый формат), затем `decisions.reject` (старый)
fn upstream_decision_count(summary: &Map<String, Value>, flat_key: &str, nested_key: &str) -> Option<u64> {
    number_field(summary, flat_key)
        .or_else(|| {
            summary
                .get("decisions")
                .and_then(Value::as_object)
                .and_then(|decisions| number_field(decisions, nested_key))
        })
        .map(|v| v.max(0.0).round() as u64)
}

fn count_decisions(records: &[JudgmentRecord], decision: &Decision) -> u64 {
    records.iter().filter(|r| r.decision_is(decision)).count() as u64
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Построить KPI dashboard-а
///
/// Поля summary от workflow предпочтительнее вычисленных, кроме total_value:
/// он всегда считается по текущей выборке.
pub fn summarize(records: &[JudgmentRecord], upstream: &Map<String, Value>) -> DashboardSummary {
    let reject_count = upstream_decision_count(upstream, "reject_count", "reject")
        .unwrap_or_else(|| count_decisions(records, &Decision::Reject));
    let approve_count = upstream_decision_count(upstream, "approve_count", "approve")
        .unwrap_or_else(|| count_decisions(records, &Decision::Approve));
    let review_count = upstream_decision_count(upstream, "review_count", "manual_review")
        .unwrap_or_else(|| count_decisions(records, &Decision::ManualReview));

    // 0 от workflow означает "не посчитано"
    let analyzed_returns = number_field(upstream, "total_analyzed")
        .filter(|v| *v > 0.0)
        .map(|v| v.round() as u64)
        .unwrap_or(records.len() as u64)
        .max(reject_count + approve_count + review_count);

    let avg_fraud_score = match number_field(upstream, "avg_fraud_score").filter(|v| *v != 0.0) {
        Some(score) => round1(score),
        None if records.is_empty() => 0.0,
        None => {
            let total: f64 = records.iter().map(|r| r.fraud_score.unwrap_or(0.0)).sum();
            round1(total / records.len() as f64)
        }
    };

    let avg_return_rate = if analyzed_returns == 0 {
        0
    } else {
        ((reject_count as f64 * 100.0) / analyzed_returns as f64)
            .round()
            .clamp(0.0, 100.0) as u32
    };

    DashboardSummary {
        analyzed_returns,
        total_value: records.iter().map(|r| r.refund_amount).sum(),
        avg_return_rate,
        avg_fraud_score,
        exclusive_cod_users: records.iter().filter(|r| r.is_exclusive_cod_user()).count() as u64,
        high_risk_count: records.iter().filter(|r| r.is_high_risk()).count() as u64,
        reject_count,
        approve_count,
        review_count,
    }
}

/// Отфильтровать записи для таблицы dashboard-а (summary не затрагивается)
pub fn filter_returns(records: Vec<JudgmentRecord>, query: &ReturnsQuery) -> Vec<JudgmentRecord> {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let decision = query
        .decision
        .as_deref()
        .filter(|d| !d.is_empty() && *d != "all");
    let risk = query.risk.as_deref().and_then(risk_filter);

    records
        .into_iter()
        .filter(|record| {
            let Some(term) = &search else { return true };
            [
                Some(record.user_name.as_str()),
                Some(record.user_mobile.as_str()),
                record.shipment_id.as_deref(),
                Some(record.delivery_city.as_str()),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(term.as_str()))
        })
        .filter(|record| match decision {
            Some(decision) => record.decision.as_ref().map(Decision::as_str) == Some(decision),
            None => true,
        })
        .filter(|record| match risk {
            Some(risk) => record.risk_tier() == risk,
            None => true,
        })
        .collect()
}

/// Значение фильтра риска; "all", пустое и нераспознанное - без фильтра
fn risk_filter(value: &str) -> Option<RiskTier> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        return None;
    }
    let parsed = RiskTier::parse(value);
    if parsed.is_none() {
        tracing::warn!("Ignoring unknown risk filter: {}", value);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a025_return_judgment::mapper::map_all;
    use crate::domain::a025_return_judgment::service::JudgmentBatch;
    use serde_json::json;

    fn records(values: Value) -> Vec<JudgmentRecord> {
        map_all(values.as_array().unwrap())
    }

    #[test]
    fn test_empty_batch_is_zero() {
        let summary = summarize(&[], &Map::new());
        assert_eq!(summary, DashboardSummary::default());
    }

    #[test]
    fn test_direct_array_scenario() {
        let batch = JudgmentBatch::from_payload(&json!([{
            "shipment_id": "S1",
            "delivery_state": "Delhi",
            "delivery_pincode": "110001",
            "key_flags": ["exclusive_cod_user", "rapid_returns", "high_cod_dependency"],
            "fraud_score": 8,
            "decision": "reject",
            "refund_amount": 1500
        }]));
        let summary = summarize(&batch.records, &batch.summary);
        assert_eq!(summary.analyzed_returns, 1);
        assert_eq!(summary.total_value, 1500.0);
        assert_eq!(summary.high_risk_count, 1);
        assert_eq!(summary.exclusive_cod_users, 1);
        assert_eq!(summary.avg_return_rate, 100);
        assert_eq!(summary.avg_fraud_score, 8.0);
        assert_eq!(summary.reject_count, 1);
    }

    #[test]
    fn test_wrapped_scenario_uses_upstream_summary() {
        let batch = JudgmentBatch::from_payload(&json!({
            "latest_data": {
                "judgments": [{ "shipment_id": "S2", "key_flags": [], "decision": "approve", "refund_amount": 300 }],
                "summary": { "total_analyzed": 1, "reject_count": 0 }
            }
        }));
        let summary = summarize(&batch.records, &batch.summary);
        assert_eq!(summary.avg_return_rate, 0);
        assert_eq!(summary.high_risk_count, 0);
        assert_eq!(summary.approve_count, 1);
        assert_eq!(summary.total_value, 300.0);
    }

    #[test]
    fn test_nested_decisions_summary() {
        let records = records(json!([
            { "decision": "reject" }, { "decision": "reject" }, { "decision": "approve" }
        ]));
        let upstream = json!({ "total_analyzed": 10, "decisions": { "reject": 4, "approve": 5, "manual_review": 1 } });
        let summary = summarize(&records, upstream.as_object().unwrap());
        assert_eq!(summary.reject_count, 4);
        assert_eq!(summary.approve_count, 5);
        assert_eq!(summary.review_count, 1);
        assert_eq!(summary.analyzed_returns, 10);
        assert_eq!(summary.avg_return_rate, 40);
    }

    #[test]
    fn test_total_value_ignores_upstream() {
        let records = records(json!([{ "refund_amount": 100 }, { "refund_amount": 250.5 }]));
        let upstream = json!({ "total_value": 999999 });
        let summary = summarize(&records, upstream.as_object().unwrap());
        assert_eq!(summary.total_value, 350.5);
    }

    #[test]
    fn test_rate_stays_in_range_with_inconsistent_upstream() {
        let records = records(json!([{ "decision": "reject" }]));
        let upstream = json!({ "total_analyzed": 2, "reject_count": 7, "approve_count": -3 });
        let summary = summarize(&records, upstream.as_object().unwrap());
        assert_eq!(summary.approve_count, 0);
        assert!(summary.reject_count + summary.approve_count + summary.review_count <= summary.analyzed_returns);
        assert!(summary.avg_return_rate <= 100);
        assert_eq!(summary.avg_return_rate, 100);
    }

    #[test]
    fn test_avg_fraud_score_treats_missing_as_zero() {
        let records = records(json!([{ "fraud_score": 7 }, { "fraud_score": 4.5 }, {}]));
        let summary = summarize(&records, &Map::new());
        assert_eq!(summary.avg_fraud_score, 3.8);

        let upstream = json!({ "avg_fraud_score": 6.25 });
        assert_eq!(summarize(&records, upstream.as_object().unwrap()).avg_fraud_score, 6.3);
    }

    #[test]
    fn test_both_exclusive_cod_spellings_count() {
        let records = records(json!([
            { "key_flags": ["exclusive_cod_user"] },
            { "key_flags": ["exclusive_cod"] },
            { "key_flags": ["high_cod_dependency"] }
        ]));
        assert_eq!(summarize(&records, &Map::new()).exclusive_cod_users, 2);
    }

    #[test]
    fn test_filter_returns() {
        let all = records(json!([
            { "shipment_id": "SHP-100", "user_name": "Priya Sharma", "delivery_state": "Delhi",
              "decision": "reject", "key_flags": ["a", "b", "c"] },
            { "shipment_id": "SHP-200", "user_id": "55", "delivery_state": "Karnataka",
              "decision": "approve", "key_flags": [] },
            { "shipment_id": "SHP-300", "user_mobile": "+91 9000000000", "delivery_state": "Delhi",
              "decision": "manual_review", "key_flags": ["a"] }
        ]));

        let query = ReturnsQuery { search: Some("delhi".into()), ..Default::default() };
        assert_eq!(filter_returns(all.clone(), &query).len(), 2);

        let query = ReturnsQuery { search: Some("9000".into()), ..Default::default() };
        assert_eq!(filter_returns(all.clone(), &query)[0].id, "SHP-300");

        let query = ReturnsQuery { decision: Some("approve".into()), ..Default::default() };
        assert_eq!(filter_returns(all.clone(), &query)[0].user_name, "User 55");

        let query = ReturnsQuery { risk: Some("high".into()), ..Default::default() };
        assert_eq!(filter_returns(all.clone(), &query)[0].id, "SHP-100");

        let query = ReturnsQuery { risk: Some("Medium".into()), ..Default::default() };
        assert_eq!(filter_returns(all.clone(), &query)[0].id, "SHP-300");

        for value in ["all", "ALL", "", "extreme"] {
            let query = ReturnsQuery { risk: Some(value.into()), ..Default::default() };
            assert_eq!(filter_returns(all.clone(), &query).len(), 3, "risk={}", value);
        }

        let query = ReturnsQuery { decision: Some("all".into()), search: Some("  ".into()), risk: None };
        assert_eq!(filter_returns(all, &query).len(), 3);
    }
}
