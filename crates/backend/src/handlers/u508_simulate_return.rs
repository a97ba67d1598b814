use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use contracts::shared::api_response::ErrorResponse;
use contracts::usecases::u508_simulate_return::{SimulateReturnRequest, SimulateReturnResponse};

use crate::state::AppState;

/// POST /api/simulate-return
///
/// Тело запроса необязательно: пустое тело - чистый сценарий для компании "1".
pub async fn simulate_return(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SimulateReturnResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request = parse_request(&body);

    match state.simulate_return_executor().execute(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Simulate return error: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "Unable to process return request. Please try again.",
                )),
            ))
        }
    }
}

/// Разбор тела; значения по умолчанию только для пустого или нечитаемого тела
fn parse_request(body: &[u8]) -> SimulateReturnRequest {
    if body.iter().all(u8::is_ascii_whitespace) {
        return SimulateReturnRequest::default();
    }
    match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Unreadable simulate-return body, using defaults: {}", e);
            SimulateReturnRequest::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_request;
    use crate::domain::a026_merchant_config::testing::MemoryConfigStore;
    use crate::handlers::test_support::post_json;
    use crate::routes::configure_routes;
    use crate::shared::workflow::testing::StubSource;
    use crate::state::testing::test_state;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_no_url_is_demo_mode_without_network() {
        let (state, forwarder) = test_state(StubSource::Timeout, MemoryConfigStore::default(), None);
        let (status, body) = post_json(configure_routes(state), "/api/simulate-return", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["demo_mode"], json!(true));
        assert_eq!(body["payload"]["event"], json!("return.requested"));
        assert_eq!(forwarder.call_count(), 0);
    }

    #[tokio::test]
    async fn test_default_url_is_used_for_forwarding() {
        let (state, forwarder) = test_state(
            StubSource::Timeout,
            MemoryConfigStore::default(),
            Some("https://automation.test/hook"),
        );
        let (status, body) = post_json(
            configure_routes(state),
            "/api/simulate-return",
            json!({ "scenario": "fraud", "company_id": "5" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["boltic_status"], json!(200));
        assert_eq!(body["payload"]["customer_id"], json!("cust_suspicious_001"));
        assert!(body.get("demo_mode").is_none());
        assert_eq!(forwarder.call_count(), 1);
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let (state, _) = test_state(StubSource::Timeout, MemoryConfigStore::broken(), None);
        let (status, body) = post_json(configure_routes(state), "/api/simulate-return", json!({})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn test_numeric_company_id_keeps_fraud_scenario() {
        let (state, forwarder) = test_state(
            StubSource::Timeout,
            MemoryConfigStore::default(),
            Some("https://automation.test/hook"),
        );
        let (status, body) = post_json(
            configure_routes(state),
            "/api/simulate-return",
            json!({ "scenario": "fraud", "company_id": 5 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["payload"]["customer_id"], json!("cust_suspicious_001"));
        assert_eq!(body["payload"]["company_id"], json!("5"));
        assert_eq!(forwarder.call_count(), 1);
    }

    #[test]
    fn test_parse_request_defaults() {
        assert_eq!(parse_request(b"").company_id, "1");
        assert_eq!(parse_request(b"  \n").company_id, "1");
        assert!(!parse_request(b"not json").scenario.is_fraud());
        assert!(parse_request(br#"{"scenario":"fraud","comments":false}"#).scenario.is_fraud());
    }
}
