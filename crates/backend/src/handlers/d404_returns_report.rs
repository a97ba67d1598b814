use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use contracts::shared::api_response::ErrorResponse;

use crate::dashboards::d402_returns_intelligence::service::summarize;
use crate::dashboards::d404_returns_report::layout::build_report;
use crate::dashboards::d404_returns_report::pdf::render_pdf;
use crate::dashboards::d404_returns_report::report_filename;
use crate::domain::a025_return_judgment::service::{fetch_batch, JudgmentBatch};
use crate::state::AppState;

/// GET /api/generate-report
///
/// Workflow недоступен - отчет строится по пустой выборке.
pub async fn generate_report(State(state): State<AppState>) -> Response {
    tracing::info!("Generating PDF report");

    let batch = fetch_batch(state.judgments.as_ref()).await.unwrap_or_else(|e| {
        tracing::error!("Report data fetch error: {}, rendering empty report", e);
        JudgmentBatch::empty()
    });

    let now = Utc::now();
    let summary = summarize(&batch.records, &batch.summary);
    let report = build_report(&batch.records, &summary, now);

    match render_pdf(&report) {
        Ok(bytes) => {
            tracing::info!("PDF report generated: {} pages", report.pages.len());
            let disposition = format!(
                "attachment; filename={}",
                report_filename(now.date_naive())
            );
            (
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("PDF generation error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to generate report")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::a026_merchant_config::testing::MemoryConfigStore;
    use crate::handlers::test_support::send;
    use crate::routes::configure_routes;
    use crate::shared::workflow::testing::StubSource;
    use crate::state::testing::test_state;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;

    async fn fetch_report(source: StubSource) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let app = configure_routes(test_state(source, MemoryConfigStore::default(), None).0);
        let request = Request::builder()
            .uri("/api/generate-report")
            .body(Body::empty())
            .unwrap();
        send(app, request).await
    }

    #[tokio::test]
    async fn test_report_is_pdf_attachment() {
        let source = StubSource::Payload(json!([
            { "shipment_id": "S1", "decision": "reject", "refund_amount": 1500, "key_flags": ["a", "b", "c"] }
        ]));
        let (status, headers, body) = fetch_report(source).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=returns-report-"));
        assert!(disposition.ends_with(".pdf"));
        assert!(body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_upstream_failure_still_renders() {
        let (status, _, body) = fetch_report(StubSource::Timeout).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with(b"%PDF"));
    }
}
