use axum::extract::State;
use axum::Json;
use chrono::Utc;
use contracts::domain::a026_merchant_config::aggregate::MerchantConfig;
use contracts::shared::api_response::WebhookAck;
use serde_json::Value;

use crate::domain::a026_merchant_config::service::{get_config, resolve_forward_url};
use crate::shared::forwarder::spawn_forward;
use crate::state::AppState;
use crate::usecases::u508_simulate_return::payload::{enrich_event, RETURN_REQUESTED};

fn string_field(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// POST /api/webhook-events
///
/// `return.requested` пересылается мерчанту в фоне, ответ платформе не ждет
/// пересылки и не зависит от ее результата.
pub async fn receive_webhook(State(state): State<AppState>, Json(body): Json<Value>) -> Json<WebhookAck> {
    let event = string_field(&body, "event").or_else(|| string_field(&body, "event_name"));
    let company_id = string_field(&body, "company_id").unwrap_or_else(|| "1".to_string());
    tracing::info!(
        "Webhook event {} received from company {}",
        event.as_deref().unwrap_or("<none>"),
        company_id
    );

    if event.as_deref() != Some(RETURN_REQUESTED) {
        return Json(WebhookAck {
            success: true,
            warning: None,
        });
    }

    // Сбой хранилища не прерывает обработку webhook
    let config = get_config(state.config_store.as_ref(), &company_id)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Config fetch error for company {}: {}", company_id, e);
            MerchantConfig::default()
        });

    let Some(url) = resolve_forward_url(&config, state.default_forward_url()) else {
        tracing::warn!("No forwarding URL configured for company {}", company_id);
        return Json(WebhookAck {
            success: true,
            warning: Some("No Boltic URL".to_string()),
        });
    };

    let label = string_field(&body, "return_id").unwrap_or_else(|| "return event".to_string());
    let payload = enrich_event(body, &config.rules, Utc::now());
    spawn_forward(state.forwarder.clone(), url, payload, label);

    Json(WebhookAck {
        success: true,
        warning: None,
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::a026_merchant_config::testing::MemoryConfigStore;
    use crate::handlers::test_support::post_json;
    use crate::routes::configure_routes;
    use crate::shared::workflow::testing::StubSource;
    use crate::state::testing::test_state;
    use axum::http::StatusCode;
    use contracts::domain::a026_merchant_config::aggregate::{MerchantConfig, MerchantRules};
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_other_events_are_acknowledged() {
        let (state, forwarder) = test_state(StubSource::Timeout, MemoryConfigStore::default(), Some("https://automation.test/hook"));
        let (status, body) = post_json(configure_routes(state), "/api/webhook-events", json!({ "event": "order.placed" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
        assert_eq!(forwarder.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_url_warns() {
        let (state, forwarder) = test_state(StubSource::Timeout, MemoryConfigStore::default(), None);
        let (_, body) = post_json(
            configure_routes(state),
            "/api/webhook-events",
            json!({ "event_name": "return.requested", "company_id": "3" }),
        )
        .await;
        assert_eq!(body, json!({ "success": true, "warning": "No Boltic URL" }));
        assert_eq!(forwarder.call_count(), 0);
    }

    #[tokio::test]
    async fn test_return_requested_is_forwarded_with_rules() {
        let store = MemoryConfigStore::with(
            "3",
            MerchantConfig {
                boltic_url: "https://merchant.test/hook".to_string(),
                rules: MerchantRules {
                    auto_approve_threshold: 750.0,
                    enable_ai: false,
                },
                updated_at: None,
            },
        );
        let (state, forwarder) = test_state(StubSource::Timeout, store, None);
        let (status, body) = post_json(
            configure_routes(state),
            "/api/webhook-events",
            json!({ "event": "return.requested", "company_id": 3, "return_id": "RTN-77" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        // пересылка идет в фоновой задаче
        for _ in 0..50 {
            if forwarder.call_count() > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let calls = forwarder.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://merchant.test/hook");
        assert_eq!(calls[0].1["merchant_rules"]["auto_approve_threshold"], json!(750.0));
        assert_eq!(calls[0].1["return_id"], json!("RTN-77"));
        assert!(calls[0].1["timestamp"].is_string());
    }
}
